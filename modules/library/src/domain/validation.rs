//! Record validation collecting every failing field before reporting.

use std::sync::LazyLock;

use regex::Regex;
use shelf_errors::FieldErrors;

use super::error::DomainError;

pub const BLANK: &str = "can't be blank";
pub const INVALID: &str = "is invalid";
pub const TAKEN: &str = "has already been taken";
pub const NOT_INCLUDED: &str = "is not included in the list";
pub const WRONG_LENGTH: &str = "is the wrong length";
pub const MUST_EXIST: &str = "must exist";
pub const DEPENDENT_BOOKS: &str = "cannot delete record with dependent books";

/// Key for errors that belong to the record as a whole.
pub const BASE: &str = "base";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Default)]
#[must_use]
pub struct RecordErrors {
    errors: FieldErrors,
}

impl RecordErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    pub fn require(&mut self, field: &str, value: Option<&str>) {
        if is_blank(value) {
            self.add(field, BLANK);
        }
    }

    /// Exact character count, checked only when a value is given.
    pub fn length(&mut self, field: &str, value: Option<&str>, expected: usize) {
        if let Some(v) = value
            && v.chars().count() != expected
        {
            self.add(field, WRONG_LENGTH);
        }
    }

    pub fn inclusion(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.add(field, NOT_INCLUDED);
        }
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// # Errors
    ///
    /// `DomainError::RecordInvalid` carrying every collected message.
    pub fn finish(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(fields = ?self.errors.keys().collect::<Vec<_>>(), "record invalid");
            Err(DomainError::RecordInvalid(self.errors))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("j.doe+tag@mail.example.org"));
        assert!(!is_valid_email("john"));
        assert!(!is_valid_email("john@localhost"));
        assert!(!is_valid_email("jo hn@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("x")));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut errors = RecordErrors::new();
        errors.require("given_name", None);
        errors.require("family_name", Some(" "));
        errors.length("isbn_10", Some("123"), 10);
        errors.length("isbn_13", None, 13);
        errors.inclusion("role", "root", &["user", "admin"]);

        let Err(DomainError::RecordInvalid(fields)) = errors.finish() else {
            panic!("expected RecordInvalid");
        };
        assert_eq!(fields["given_name"], [BLANK]);
        assert_eq!(fields["family_name"], [BLANK]);
        assert_eq!(fields["isbn_10"], [WRONG_LENGTH]);
        assert_eq!(fields["role"], [NOT_INCLUDED]);
        assert!(!fields.contains_key("isbn_13"));
    }

    #[test]
    fn test_multiple_messages_per_field() {
        let mut errors = RecordErrors::new();
        errors.require("email", Some(""));
        errors.add("email", INVALID);
        let Err(DomainError::RecordInvalid(fields)) = errors.finish() else {
            panic!("expected RecordInvalid");
        };
        assert_eq!(fields["email"], [BLANK, INVALID]);
    }

    #[test]
    fn test_length_counts_chars() {
        let mut errors = RecordErrors::new();
        errors.length("isbn_10", Some("ééééééééé0"), 10);
        assert!(errors.is_empty());
        assert!(errors.finish().is_ok());
    }
}
