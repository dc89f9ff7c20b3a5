use axum::extract::rejection::JsonRejection;
use shelf_errors::{ApiError, ErrDef};
use shelf_security::Denied;

use crate::domain::error::DomainError;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { resource, id } => {
                tracing::debug!(resource, id, "record not found");
                ErrDef::NOT_FOUND.as_error()
            }
            DomainError::RecordInvalid(fields) => ApiError::record_invalid(fields),
            DomainError::Query(q) => q.into(),
            DomainError::Database { message } => {
                // details stay in the log
                tracing::error!(error = %message, "database error occurred");
                ErrDef::INTERNAL.as_error()
            }
        }
    }
}

#[must_use]
pub fn denied_to_error(denied: Denied) -> ApiError {
    match denied {
        Denied::Unauthenticated => ErrDef::UNAUTHORIZED.as_error(),
        Denied::Forbidden => ErrDef::FORBIDDEN.as_error(),
    }
}

/// Malformed or envelope-less request bodies.
#[must_use]
pub fn bad_body(rejection: &JsonRejection) -> ApiError {
    ErrDef::BAD_REQUEST.with_message(rejection.body_text())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use shelf_errors::{FieldErrors, InvalidParams};
    use tracing_test::traced_test;

    #[test]
    fn test_not_found_is_generic() {
        let api: ApiError = DomainError::not_found("authors", 7).into();
        assert_eq!(api.status.as_u16(), 404);
        assert_eq!(api.error.message.as_deref(), Some("Not Found"));
        assert!(api.error.invalid_params.is_none());
    }

    #[test]
    fn test_record_invalid_keeps_fields() {
        let fields = FieldErrors::from([("name".to_owned(), vec!["can't be blank".to_owned()])]);
        let api: ApiError = DomainError::RecordInvalid(fields.clone()).into();
        assert_eq!(api.status.as_u16(), 422);
        assert_eq!(api.error.invalid_params, Some(InvalidParams::Fields(fields)));
    }

    #[test]
    fn test_query_error_is_bad_request() {
        let api: ApiError = DomainError::Query(shelf_query::Error::invalid_value("q[id_gt]", "abc")).into();
        assert_eq!(api.status.as_u16(), 400);
        assert_eq!(
            api.error.invalid_params,
            Some(InvalidParams::Param("q[id_gt]=abc".to_owned()))
        );
    }

    #[test]
    #[traced_test]
    fn test_database_error_hides_details() {
        let api: ApiError = DomainError::database("no such table: authors").into();
        assert_eq!(api.status.as_u16(), 500);
        assert_eq!(api.error.message.as_deref(), Some("Internal Server Error"));
        assert!(logs_contain("no such table: authors"));
    }

    #[test]
    fn test_denied() {
        assert_eq!(denied_to_error(Denied::Unauthenticated).status.as_u16(), 401);
        assert_eq!(denied_to_error(Denied::Forbidden).status.as_u16(), 403);
    }
}
