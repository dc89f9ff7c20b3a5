use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use shelf_security::PolicyEngineRef;
use tracing::info;

use crate::api::rest::{AppState, Presenters, router};
use crate::config::LibraryConfig;
use crate::domain::service::Service;
use crate::infra::storage::Migrator;

/// Composition root: service, contracts, limits and policy wired into a router.
#[derive(Clone)]
pub struct Library {
    state: AppState,
}

impl Library {
    /// # Errors
    ///
    /// Fails if a resource contract is inconsistent.
    pub fn new(
        conn: DatabaseConnection,
        config: &LibraryConfig,
        policy: PolicyEngineRef,
    ) -> anyhow::Result<Self> {
        let presenters = Presenters::new()?;
        let limits = config.limits();
        info!(
            default_per = limits.default_per,
            max_per = limits.max_per,
            "library module initialized"
        );
        Ok(Self {
            state: AppState {
                service: Arc::new(Service::new(conn)),
                presenters: Arc::new(presenters),
                limits,
                policy,
            },
        })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    ///
    /// Propagates migration failures.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        Migrator::up(conn, None).await?;
        info!("library migrations applied");
        Ok(())
    }

    #[must_use]
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }
}
