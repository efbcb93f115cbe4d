/// JSON file backend
pub mod file;
/// In-memory backend
pub mod memory;
/// Remote SQL-over-HTTP backend
pub mod remote;
/// Local SQLite backend
pub mod sqlite;

use crate::config::{Config, StorageKind};
use crate::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Trait for storage backend implementations
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a new task and return it with its assigned ID
    async fn insert(&self, task: NewTask) -> crate::Result<Task>;

    /// List all tasks in storage order
    async fn list(&self) -> crate::Result<Vec<Task>>;

    /// Replace the fields of an existing task
    async fn update(&self, id: u64, changes: TaskChanges) -> crate::Result<Task>;

    /// Remove a task, returning whether it existed
    async fn delete(&self, id: u64) -> crate::Result<bool>;

    /// Check if storage is healthy
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and the health endpoint
    fn kind(&self) -> &'static str;
}

/// SQL integer keys are signed; larger ids can never name a stored row
pub(crate) fn sql_key(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Build the backend selected by the configuration
pub async fn open(config: &Config) -> crate::Result<Arc<dyn StorageBackend>> {
    let backend: Arc<dyn StorageBackend> = match config.storage_backend {
        StorageKind::Memory => Arc::new(memory::MemoryBackend::new()),
        StorageKind::File => Arc::new(file::FileBackend::open(&config.data_file).await?),
        StorageKind::Sqlite => Arc::new(sqlite::SqliteBackend::open(&config.database_path).await?),
        StorageKind::Remote => {
            let url = config.remote_url.as_deref().ok_or_else(|| {
                crate::TaskManagerError::ConfigError(
                    "remote_url is required for the remote backend".to_string(),
                )
            })?;
            let timeout = Duration::from_secs(config.remote_timeout_secs);
            Arc::new(remote::RemoteBackend::connect(url, timeout).await?)
        }
    };

    info!("Opened {} storage backend", backend.kind());
    Ok(backend)
}
