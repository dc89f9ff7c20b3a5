//! Mapping from query errors to the HTTP error envelope (pure data)

use crate::Error;
use shelf_errors::ApiError;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        tracing::debug!(reason = ?err.reason(), param = %err.invalid_param(), "query rejected");
        ApiError::invalid_param(err.invalid_param().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_errors::InvalidParams;

    #[test]
    fn every_reason_maps_to_400_with_single_param() {
        let cases = [
            Error::unknown_field("fields", "fid"),
            Error::invalid_operator("q[name_like]", "x"),
            Error::invalid_value("page", "fake"),
            Error::invalid_relation("embed", "authorr"),
        ];
        for err in cases {
            let expected = err.invalid_param().to_string();
            let api: ApiError = err.into();
            assert_eq!(api.status.as_u16(), 400);
            assert_eq!(api.error.invalid_params, Some(InvalidParams::Param(expected)));
            assert!(api.error.message.is_none());
        }
    }
}
