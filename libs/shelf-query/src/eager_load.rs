//! `embed=` and `include=` relation requests.
//!
//! `embed` changes the response shape (related records are rendered inline),
//! `include` only asks storage to batch-load the relation. Both draw from the
//! same whitelist.

use std::collections::BTreeSet;

use crate::contract::PresenterContract;
use crate::error::Error;

pub const EMBED_PARAM: &str = "embed";
pub const INCLUDE_PARAM: &str = "include";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EagerLoad {
    embeds: BTreeSet<String>,
    includes: BTreeSet<String>,
}

fn relations(
    param: &str,
    raw: Option<&str>,
    contract: &PresenterContract,
) -> Result<BTreeSet<String>, Error> {
    let mut out = BTreeSet::new();
    let Some(raw) = raw else {
        return Ok(out);
    };
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !contract.allows_relation(token) {
            return Err(Error::invalid_relation(param, token));
        }
        out.insert(token.to_owned());
    }
    Ok(out)
}

/// Validate both relation parameters; `embed` is checked first.
///
/// # Errors
///
/// `Error::InvalidRelation` as `embed=<token>` or `include=<token>` for the
/// first relation the contract does not declare.
pub fn resolve(
    embed: Option<&str>,
    include: Option<&str>,
    contract: &PresenterContract,
) -> Result<EagerLoad, Error> {
    Ok(EagerLoad {
        embeds: relations(EMBED_PARAM, embed, contract)?,
        includes: relations(INCLUDE_PARAM, include, contract)?,
    })
}

impl EagerLoad {
    #[must_use]
    pub fn embeds_relation(&self, relation: &str) -> bool {
        self.embeds.contains(relation)
    }

    /// Whether storage should load `relation`, for either reason.
    #[must_use]
    pub fn loads(&self, relation: &str) -> bool {
        self.embeds.contains(relation) || self.includes.contains(relation)
    }
}
