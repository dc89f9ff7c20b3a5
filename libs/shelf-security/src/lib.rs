#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod policy_engine;

pub use context::SecurityContext;
pub use policy_engine::{
    AccessRequest, Action, AllowAllPolicy, AuthenticatedWritesPolicy, Denied, PolicyEngine,
    PolicyEngineRef, PolicyKind, authorize,
};
