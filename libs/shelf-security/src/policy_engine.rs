use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SecurityContext;

/// Type alias for a reference-counted Policy Engine
pub type PolicyEngineRef = Arc<dyn PolicyEngine>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Index,
    Show,
    Create,
    Update,
    Destroy,
}

impl Action {
    #[must_use]
    pub fn is_read(self) -> bool {
        matches!(self, Action::Index | Action::Show)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Show => "show",
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }
}

/// What is being attempted. `owner_id` is the user owning the target
/// record, when the resource has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequest<'a> {
    pub resource: &'a str,
    pub action: Action,
    pub owner_id: Option<i64>,
}

impl<'a> AccessRequest<'a> {
    #[must_use]
    pub fn new(resource: &'a str, action: Action) -> Self {
        Self {
            resource,
            action,
            owner_id: None,
        }
    }

    #[must_use]
    pub fn owned_by(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// Yes/no authorization gate consulted before any request work.
pub trait PolicyEngine: Send + Sync {
    fn allows(&self, ctx: &SecurityContext, request: &AccessRequest<'_>) -> bool;
}

/// Permits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllPolicy;

impl PolicyEngine for AllowAllPolicy {
    fn allows(&self, _ctx: &SecurityContext, _request: &AccessRequest<'_>) -> bool {
        true
    }
}

/// Reads are open; writes need a subject. Records owned by a user may only
/// be changed by that user or an admin.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedWritesPolicy;

impl PolicyEngine for AuthenticatedWritesPolicy {
    fn allows(&self, ctx: &SecurityContext, request: &AccessRequest<'_>) -> bool {
        if request.action.is_read() {
            return true;
        }
        let Some(subject) = ctx.subject_id() else {
            return false;
        };
        match request.owner_id {
            Some(owner) => owner == subject || ctx.is_admin(),
            None => true,
        }
    }
}

/// Configurable choice of policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    AllowAll,
    AuthenticatedWrites,
}

impl PolicyKind {
    #[must_use]
    pub fn engine(self) -> PolicyEngineRef {
        match self {
            PolicyKind::AllowAll => Arc::new(AllowAllPolicy),
            PolicyKind::AuthenticatedWrites => Arc::new(AuthenticatedWritesPolicy),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    /// Denied and nobody is signed in.
    #[error("authentication required")]
    Unauthenticated,
    /// Denied for the signed-in subject.
    #[error("forbidden")]
    Forbidden,
}

/// Consult `engine` and classify a refusal.
///
/// # Errors
///
/// `Denied::Unauthenticated` when the context is anonymous,
/// `Denied::Forbidden` otherwise.
pub fn authorize(
    engine: &dyn PolicyEngine,
    ctx: &SecurityContext,
    request: &AccessRequest<'_>,
) -> Result<(), Denied> {
    if engine.allows(ctx, request) {
        return Ok(());
    }
    tracing::warn!(
        resource = request.resource,
        action = request.action.as_str(),
        subject_id = ?ctx.subject_id(),
        "access denied"
    );
    if ctx.is_anonymous() {
        Err(Denied::Unauthenticated)
    } else {
        Err(Denied::Forbidden)
    }
}
