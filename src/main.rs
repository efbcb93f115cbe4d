//! Task Manager RS binary entry point

use std::time::Duration;
use task_manager_rs::api::{self, AppState};
use task_manager_rs::{config::Config, storage, TaskRepository};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Task Manager RS");

    let config = Config::load()?;
    config.validate()?;

    info!(
        "Initialized with {:?} storage, listening on {}",
        config.storage_backend,
        config.bind_address()
    );

    let backend = storage::open(&config).await?;
    let state = AppState::new(TaskRepository::new(backend));

    let listener = TcpListener::bind(config.bind_address()).await?;
    api::serve(
        listener,
        state,
        Duration::from_secs(config.shutdown_timeout_secs),
    )
    .await?;

    Ok(())
}
