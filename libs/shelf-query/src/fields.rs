//! `fields=f1,f2,...` selection.

use crate::contract::PresenterContract;
use crate::error::Error;

pub const FIELDS_PARAM: &str = "fields";

/// Validate a requested field list against the contract.
///
/// Absent input yields the contract's default fields. Otherwise the tokens
/// come back in the order the client asked for them; blank tokens from stray
/// commas are skipped and a repeated token is kept once.
///
/// # Errors
///
/// `Error::UnknownField` naming only the first offending token, e.g.
/// `fields=fid`. A list with no tokens at all is rejected as `fields=`.
pub fn select(requested: Option<&str>, contract: &PresenterContract) -> Result<Vec<String>, Error> {
    let Some(raw) = requested else {
        return Ok(contract.default_fields().to_vec());
    };

    let mut selected: Vec<String> = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !contract.allows_field(token) {
            return Err(Error::unknown_field(FIELDS_PARAM, token));
        }
        if !selected.iter().any(|s| s == token) {
            selected.push(token.to_owned());
        }
    }

    if selected.is_empty() {
        return Err(Error::unknown_field(FIELDS_PARAM, raw));
    }
    Ok(selected)
}
