//! Storage side of the query pipeline.
//!
//! A [`ColumnMap`] ties API field names to entity columns; [`paginate_plan`]
//! applies a validated [`shelf_query::QueryPlan`] to a `sea_orm::Select`
//! (filters as bound-parameter conditions, ordering with a primary-key
//! tiebreaker, count, then offset/limit).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod error;
pub mod kind;
pub mod query;

pub use config::{DbConfig, connect};
pub use error::StorageError;
pub use kind::FieldKind;
pub use query::{ColumnMap, PlanSelectExt, paginate_plan, predicate_to_condition};
