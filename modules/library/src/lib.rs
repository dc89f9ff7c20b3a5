//! Library module
//!
//! JSON API over authors, publishers, users and books. Every list endpoint
//! accepts the same whitelisted query vocabulary (`fields`, `sort`/`dir`,
//! `q[...]` filters, `page`/`per`, `embed`/`include`), validated per resource
//! before any SQL runs.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod module;
pub use module::Library;

pub mod config;
pub use config::LibraryConfig;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
