//! `sort=<field>&dir=asc|desc` validation.

use crate::contract::PresenterContract;
use crate::error::Error;

pub const SORT_PARAM: &str = "sort";
pub const DIR_PARAM: &str = "dir";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Parse `asc`/`desc`, ignoring ASCII case.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderKey {
    pub field: String,
    pub dir: SortDir,
}

/// Validate the requested ordering.
///
/// No `sort` means no ordering; `dir` is only read alongside `sort` and
/// defaults to ascending. Ties are not broken here: the storage layer
/// appends the primary key ascending so pages stay stable.
///
/// # Errors
///
/// `Error::UnknownField` as `sort=<column>` for a column outside the
/// contract, `Error::InvalidValue` as `dir=<raw>` for a direction other than
/// `asc`/`desc`.
pub fn sort(
    column: Option<&str>,
    direction: Option<&str>,
    contract: &PresenterContract,
) -> Result<Option<OrderKey>, Error> {
    let Some(column) = column else {
        return Ok(None);
    };
    if !contract.allows_sort(column) {
        return Err(Error::unknown_field(SORT_PARAM, column));
    }
    let dir = match direction {
        None => SortDir::Asc,
        Some(raw) => SortDir::parse(raw).ok_or_else(|| Error::invalid_value(DIR_PARAM, raw))?,
    };
    Ok(Some(OrderKey {
        field: column.to_owned(),
        dir,
    }))
}
