//! Error envelope shared by every Shelf HTTP endpoint.
//!
//! Pure data types; the axum integration lives behind the `axum` feature.
//! - `ApiError`: status plus the `{"error": {...}}` body
//! - `ErrDef`: static catalog entries for the generic failures
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{ApiError, ErrorBody, FieldErrors, InvalidParams};

/// Result alias for handlers that fail with an [`ApiError`].
pub type ApiResult<T = ()> = Result<T, ApiError>;
