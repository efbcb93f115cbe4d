//! HTTP layer
//!
//! Maps the task routes onto [`TaskRepository`] and owns the server
//! lifecycle.

/// JSON error responses
pub mod error;
/// Route handlers
pub mod handlers;
/// Response bodies
pub mod models;

use crate::repository::TaskRepository;
use axum::routing::{get, put};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tokio::time::timeout;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Repository the routes operate on
    pub repository: TaskRepository,
}

impl AppState {
    /// Create state around a repository
    pub fn new(repository: TaskRepository) -> Self {
        Self { repository }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::add_task),
        )
        .route(
            "/tasks/:id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `listener` until Ctrl+C or SIGTERM
///
/// In-flight requests get `shutdown_timeout` to finish once a signal arrives.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown_timeout: Duration,
) -> crate::Result<()> {
    let app = router(state);
    info!("HTTP server listening on http://{}", listener.local_addr()?);

    let (signal_tx, signal_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(());
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => return flatten(result),
        _ = signal_rx => {}
    }

    info!(
        "Waiting up to {}s for in-flight requests...",
        shutdown_timeout.as_secs()
    );
    match timeout(shutdown_timeout, server).await {
        Ok(result) => {
            flatten(result)?;
            info!("Server shutdown complete");
            Ok(())
        }
        Err(_) => {
            warn!("Shutdown timeout exceeded, some requests may still be running");
            Err(crate::TaskManagerError::ServerError(
                "Shutdown timeout exceeded".to_string(),
            ))
        }
    }
}

fn flatten(result: Result<std::io::Result<()>, JoinError>) -> crate::Result<()> {
    match result {
        Ok(served) => Ok(served?),
        Err(e) => Err(crate::TaskManagerError::ServerError(e.to_string())),
    }
}

async fn shutdown_signal() {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C signal");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM signal");
        }
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
