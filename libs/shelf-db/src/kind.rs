//! Logical column types used to coerce filter values.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I64,
    Bool,
    Date,
    DateTimeUtc,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "String"),
            FieldKind::I64 => write!(f, "I64"),
            FieldKind::Bool => write!(f, "Bool"),
            FieldKind::Date => write!(f, "Date"),
            FieldKind::DateTimeUtc => write!(f, "DateTimeUtc"),
        }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" => Some(true),
        "false" | "0" | "f" => Some(false),
        _ => None,
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl FieldKind {
    /// Parse a raw query-string value into a bindable value of this kind.
    #[must_use]
    pub fn coerce(self, raw: &str) -> Option<sea_orm::Value> {
        let raw_trimmed = raw.trim();
        match self {
            FieldKind::String => Some(sea_orm::Value::from(raw.to_owned())),
            FieldKind::I64 => raw_trimmed.parse::<i64>().ok().map(sea_orm::Value::from),
            FieldKind::Bool => parse_bool(raw_trimmed).map(sea_orm::Value::from),
            FieldKind::Date => NaiveDate::parse_from_str(raw_trimmed, "%Y-%m-%d")
                .ok()
                .map(sea_orm::Value::from),
            FieldKind::DateTimeUtc => parse_datetime(raw_trimmed).map(sea_orm::Value::from),
        }
    }
}
