use std::sync::Arc;

use shelf_errors::ApiResult;
use shelf_query::QueryLimits;
use shelf_security::{AccessRequest, PolicyEngineRef, SecurityContext, authorize};

use super::error::denied_to_error;
use super::presenters::Presenters;
use crate::domain::service::Service;

/// Shared by every handler; contracts and limits are built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Service>,
    pub presenters: Arc<Presenters>,
    pub limits: QueryLimits,
    pub policy: PolicyEngineRef,
}

impl AppState {
    /// # Errors
    ///
    /// 401 for an anonymous actor the policy refuses, 403 otherwise.
    pub fn authorize(&self, ctx: &SecurityContext, request: &AccessRequest<'_>) -> ApiResult {
        authorize(self.policy.as_ref(), ctx, request).map_err(denied_to_error)
    }
}
