//! Static definitions for the generic, message-only failures

use crate::problem::ApiError;
use http::StatusCode;

#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub message: &'static str,
}

impl ErrDef {
    pub const BAD_REQUEST: Self = Self::new(400, "Bad Request");
    pub const UNAUTHORIZED: Self = Self::new(401, "Unauthorized");
    pub const FORBIDDEN: Self = Self::new(403, "Forbidden");
    pub const NOT_FOUND: Self = Self::new(404, "Not Found");
    pub const INTERNAL: Self = Self::new(500, "Internal Server Error");

    #[must_use]
    pub const fn new(status: u16, message: &'static str) -> Self {
        Self { status, message }
    }

    /// Convert this definition into an [`ApiError`] carrying its default message.
    #[inline]
    pub fn as_error(&self) -> ApiError {
        self.with_message(self.message)
    }

    /// Same status, custom message.
    #[inline]
    pub fn with_message(&self, message: impl Into<String>) -> ApiError {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ApiError::new(status, message)
    }
}
