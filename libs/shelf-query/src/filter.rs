//! `q[<field>_<op>]=<value>` filter predicates.
//!
//! The operator is never interpreted as text downstream: each token maps to
//! a [`FilterOp`] and the storage layer turns that into a fixed comparison
//! with the value bound as a parameter.

use std::fmt;

use crate::contract::PresenterContract;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Cont,
    NotCont,
    Start,
    End,
    Gt,
    Gteq,
    Lt,
    Lteq,
    In,
    NotIn,
    Null,
    Present,
}

/// Operator suffixes, longest first so `_not_eq` is tried before `_eq`.
const OPERATORS: &[(&str, FilterOp)] = &[
    ("not_cont", FilterOp::NotCont),
    ("present", FilterOp::Present),
    ("not_eq", FilterOp::NotEq),
    ("not_in", FilterOp::NotIn),
    ("start", FilterOp::Start),
    ("gteq", FilterOp::Gteq),
    ("lteq", FilterOp::Lteq),
    ("cont", FilterOp::Cont),
    ("null", FilterOp::Null),
    ("end", FilterOp::End),
    ("gte", FilterOp::Gteq),
    ("lte", FilterOp::Lteq),
    ("eq", FilterOp::Eq),
    ("gt", FilterOp::Gt),
    ("lt", FilterOp::Lt),
    ("in", FilterOp::In),
];

impl FilterOp {
    /// Canonical token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::NotEq => "not_eq",
            FilterOp::Cont => "cont",
            FilterOp::NotCont => "not_cont",
            FilterOp::Start => "start",
            FilterOp::End => "end",
            FilterOp::Gt => "gt",
            FilterOp::Gteq => "gteq",
            FilterOp::Lt => "lt",
            FilterOp::Lteq => "lteq",
            FilterOp::In => "in",
            FilterOp::NotIn => "not_in",
            FilterOp::Null => "null",
            FilterOp::Present => "present",
        }
    }

    /// Pattern operators match against text with `LIKE`.
    #[must_use]
    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            FilterOp::Cont | FilterOp::NotCont | FilterOp::Start | FilterOp::End
        )
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    List(Vec<String>),
    Flag(bool),
}

/// One validated condition. `key` and `raw` keep the client's spelling for
/// diagnostics raised later by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub op: FilterOp,
    pub value: FilterValue,
    key: String,
    raw: String,
}

impl Predicate {
    /// The parameter name as sent, e.g. `q[given_name_cont]`.
    #[must_use]
    pub fn param_key(&self) -> String {
        format!("q[{}]", self.key)
    }

    /// Value the storage layer could not coerce for this predicate's column.
    pub fn invalid_value(&self) -> Error {
        Error::invalid_value(self.param_key(), &self.raw)
    }

    /// Operator that does not apply to this predicate's column type.
    pub fn invalid_operator(&self) -> Error {
        Error::invalid_operator(self.param_key(), &self.raw)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" => Some(true),
        "false" | "0" | "f" => Some(false),
        _ => None,
    }
}

/// Split a compound key into `(field, op)`.
///
/// Suffixes are tried longest first; the first one whose prefix is an
/// allowed filter field wins.
fn split_key(key: &str, contract: &PresenterContract) -> Result<(String, FilterOp), bool> {
    let mut suffix_matched = false;
    for (token, op) in OPERATORS {
        let Some(field) = key
            .strip_suffix(token)
            .and_then(|rest| rest.strip_suffix('_'))
        else {
            continue;
        };
        suffix_matched = true;
        if contract.allows_filter(field) {
            return Ok((field.to_owned(), *op));
        }
    }
    Err(suffix_matched)
}

/// Validate raw `(inner key, value)` predicate entries.
///
/// Output order matches input order; predicates are AND-combined by the
/// consumer.
///
/// # Errors
///
/// Echoes the compound key verbatim, e.g. `q[fgiven_name_cont]=Pat`:
/// - `Error::UnknownField` when an operator suffix is recognised but the
///   field before it is not filterable
/// - `Error::InvalidOperator` when no suffix from the vocabulary matches
/// - `Error::InvalidValue` when `null`/`present` get something other than a
///   boolean
pub fn filter<'a, I>(raw_predicates: I, contract: &PresenterContract) -> Result<Vec<Predicate>, Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = Vec::new();
    for (key, raw) in raw_predicates {
        let param = format!("q[{key}]");
        let (field, op) = match split_key(key, contract) {
            Ok(split) => split,
            Err(true) => return Err(Error::unknown_field(param, raw)),
            Err(false) => return Err(Error::invalid_operator(param, raw)),
        };

        let value = match op {
            FilterOp::In | FilterOp::NotIn => FilterValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            FilterOp::Null | FilterOp::Present => FilterValue::Flag(
                parse_flag(raw).ok_or_else(|| Error::invalid_value(param, raw))?,
            ),
            _ => FilterValue::Single(raw.to_owned()),
        };

        out.push(Predicate {
            field,
            op,
            value,
            key: key.to_owned(),
            raw: raw.to_owned(),
        });
    }
    Ok(out)
}
