//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the audit worker and the Axum
//! server lifecycle.

use crate::application::services::{AuditLogger, RouteResolver};
use crate::config::Config;
use crate::domain::audit_worker::{AuditError, AuditWorker};
use crate::infrastructure::persistence::{PgAccessLogRepository, PgRouteRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result, anyhow};
use sqlx::postgres::PgPoolOptions;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinError;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background audit worker
/// - Axum HTTP server with graceful shutdown
///
/// On shutdown the audit queue is drained before returning.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - The audit worker gives up on writing the access log
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let route_repository = Arc::new(PgRouteRepository::new(pool.clone()));
    let access_log_repository = Arc::new(PgAccessLogRepository::new(pool));

    let (audit_tx, audit_rx) = mpsc::channel(config.audit_queue_capacity);
    let worker = AuditWorker::new(
        audit_rx,
        access_log_repository,
        config.audit_worker_settings(),
    );
    let mut worker_handle = tokio::spawn(worker.run());

    let state = AppState::new(
        Arc::new(RouteResolver::new(route_repository)),
        AuditLogger::new(audit_tx, config.audit_enqueue_timeout()),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .into_future();

    tokio::select! {
        result = server => {
            result.context("HTTP server error")?;
        }
        outcome = &mut worker_handle => {
            // The worker only ends while senders are alive if it gave up on the audit trail.
            return Err(worker_fault(outcome));
        }
    }

    tracing::info!("Server stopped, draining audit queue");
    match worker_handle.await {
        Ok(Ok(())) => Ok(()),
        outcome => Err(worker_fault(outcome)),
    }
}

fn worker_fault(outcome: Result<Result<(), AuditError>, JoinError>) -> anyhow::Error {
    let err = match outcome {
        Ok(Ok(())) => anyhow!("Audit worker stopped unexpectedly"),
        Ok(Err(e)) => anyhow::Error::new(e),
        Err(e) => anyhow::Error::new(e),
    };
    tracing::error!(error = %err, "Audit trail broken, shutting down");
    err.context("Audit worker failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
