use std::fmt;

use thiserror::Error;

/// The offending query parameter as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParam {
    pub key: String,
    pub value: String,
}

impl InvalidParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for InvalidParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    UnknownField,
    InvalidOperator,
    InvalidValue,
    InvalidRelation,
}

/// Structural rejection of a request's query parameters.
///
/// Every variant is terminal for the request and maps to a 400 carrying
/// the single offending parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown field: {0}")]
    UnknownField(InvalidParam),

    #[error("invalid operator: {0}")]
    InvalidOperator(InvalidParam),

    #[error("invalid value: {0}")]
    InvalidValue(InvalidParam),

    #[error("invalid relation: {0}")]
    InvalidRelation(InvalidParam),
}

impl Error {
    pub fn unknown_field(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownField(InvalidParam::new(key, value))
    }

    pub fn invalid_operator(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidOperator(InvalidParam::new(key, value))
    }

    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue(InvalidParam::new(key, value))
    }

    pub fn invalid_relation(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidRelation(InvalidParam::new(key, value))
    }

    #[must_use]
    pub fn reason(&self) -> Reason {
        match self {
            Self::UnknownField(_) => Reason::UnknownField,
            Self::InvalidOperator(_) => Reason::InvalidOperator,
            Self::InvalidValue(_) => Reason::InvalidValue,
            Self::InvalidRelation(_) => Reason::InvalidRelation,
        }
    }

    #[must_use]
    pub fn invalid_param(&self) -> &InvalidParam {
        match self {
            Self::UnknownField(p)
            | Self::InvalidOperator(p)
            | Self::InvalidValue(p)
            | Self::InvalidRelation(p) => p,
        }
    }
}
