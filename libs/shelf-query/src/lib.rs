//! Query-parameter pipeline for collection endpoints.
//!
//! Untrusted `fields`, `sort`/`dir`, `q[...]`, `page`/`per`, `embed` and
//! `include` parameters are checked against a per-resource
//! [`PresenterContract`] and turned into a [`QueryPlan`]. Anything the
//! contract does not whitelist is rejected with an [`Error`] that names the
//! exact offending `key=value`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod contract;
pub mod eager_load;
pub mod error;
pub mod fields;
pub mod filter;
pub mod limits;
pub mod page;
pub mod pagination;
pub mod params;
pub mod pipeline;
pub mod problem_mapping;
pub mod sort;

pub use contract::{ContractError, MatchCase, PresenterContract};
pub use eager_load::EagerLoad;
pub use error::{Error, InvalidParam, Reason};
pub use filter::{FilterOp, FilterValue, Predicate};
pub use limits::QueryLimits;
pub use page::Page;
pub use pagination::{LinkRel, PageRequest, PageWindow};
pub use params::RawQueryParams;
pub use pipeline::{MemberPlan, QueryPlan};
pub use sort::{OrderKey, SortDir};
