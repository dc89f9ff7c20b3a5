use anyhow::Result;
use library::Library;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Connect, migrate, and serve until a shutdown signal arrives.
///
/// # Errors
///
/// Fails on a bad bind address, an unreachable database, a failed
/// migration, or a socket error.
pub async fn run(config: &AppConfig) -> Result<()> {
    let addr = config.server.bind_addr()?;

    let conn = shelf_db::connect(&config.database).await?;
    Library::migrate(&conn).await?;
    let library = Library::new(conn, &config.library, config.auth.policy.engine())?;

    let app = library.router().layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, policy = ?config.auth.policy, "HTTP server bound");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handling failed; shutting down");
            }
        })
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        }
        result = wait_sigterm() => result?,
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<()> {
    let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    term.recv().await;
    tracing::info!("Received SIGTERM signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<()> {
    std::future::pending::<Result<()>>().await
}
