//! # Stayhub Web
//!
//! HTTP surface over the inventory and search services.
//!
//! Identity terminates at the upstream auth proxy; this server trusts
//! the `X-User-Id` / `X-User-Roles` headers it forwards. Everything
//! else — validation, authorization, availability semantics — lives in
//! the service crates; handlers only translate between HTTP and the
//! domain types.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

use crate::config::ServerConfig;
use crate::state::AppState;
use sqlx::postgres::PgPoolOptions;

pub use error::AppError;

/// Run the server until SIGINT or SIGTERM.
///
/// Connects the pool, applies pending migrations, builds the router and
/// serves it with graceful shutdown.
///
/// # Errors
///
/// Returns error when the pool cannot connect, migrations fail, or the
/// listen address is unavailable.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let ledger = stayhub_inventory::stores::postgres::PostgresAvailabilityLedger::new(pool.clone());
    ledger.migrate().await?;

    let state = AppState::new(pool, &config);
    let app = router::build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
