//! The `{"error": {...}}` envelope (pure data model, no HTTP framework dependencies)

use std::collections::BTreeMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Field name to the list of human readable messages for that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Payload of `invalid_params`.
///
/// Query-parameter rejections carry exactly one `key=value` string, record
/// validation failures carry a field to messages mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvalidParams {
    Param(String),
    Fields(FieldErrors),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_params: Option<InvalidParams>,
}

/// An HTTP error response: status code plus `{"error": ErrorBody}`.
///
/// The status is not part of the body; it is carried next to it and applied
/// when the error is turned into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: ErrorBody,
}

impl ApiError {
    /// Error with a plain message and no `invalid_params`.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ErrorBody {
                message: Some(message.into()),
                invalid_params: None,
            },
        }
    }

    /// 400 naming the single offending query parameter as `key=value`.
    pub fn invalid_param(param: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ErrorBody {
                message: None,
                invalid_params: Some(InvalidParams::Param(param.into())),
            },
        }
    }

    /// 422 carrying the per-field messages of a rejected record.
    pub fn record_invalid(fields: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ErrorBody {
                message: None,
                invalid_params: Some(InvalidParams::Fields(fields)),
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error.message = Some(message.into());
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.status)?;
        if let Some(msg) = &self.error.message {
            write!(f, ": {msg}")?;
        }
        match &self.error.invalid_params {
            Some(InvalidParams::Param(p)) => write!(f, " (invalid {p})"),
            Some(InvalidParams::Fields(fields)) => {
                write!(f, " (invalid fields: ")?;
                let mut first = true;
                for name in fields.keys() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name}")?;
                }
                write!(f, ")")
            }
            None => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Axum integration: make `ApiError` directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp
    }
}
