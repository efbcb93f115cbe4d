//! Task repository
//!
//! Validates requests and applies the task contract on top of whichever
//! [`StorageBackend`] was selected at startup.

use crate::storage::StorageBackend;
use crate::task::{Task, TaskInput};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The authoritative task collection behind the HTTP layer
#[derive(Clone)]
pub struct TaskRepository {
    backend: Arc<dyn StorageBackend>,
}

impl TaskRepository {
    /// Create a repository over the given backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Create a repository over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::storage::memory::MemoryBackend::new()))
    }

    /// Name of the backend in use
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// Validate and store a new task
    pub async fn create(&self, input: TaskInput) -> crate::Result<Task> {
        let new_task = input
            .into_new_task()
            .inspect_err(|e| warn!("Rejected task: {}", e))?;
        let task = self.backend.insert(new_task).await?;
        info!("Task {} created", task.id);
        Ok(task)
    }

    /// All tasks in storage order
    pub async fn list(&self) -> crate::Result<Vec<Task>> {
        let tasks = self.backend.list().await?;
        debug!("Listed {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Replace the name (and optionally the description) of a task
    pub async fn update(&self, id: u64, input: TaskInput) -> crate::Result<Task> {
        let changes = input
            .into_changes()
            .inspect_err(|e| warn!("Rejected update of task {}: {}", id, e))?;
        let task = self
            .backend
            .update(id, changes)
            .await
            .inspect_err(|e| warn!("Update of task {} failed: {}", id, e))?;
        info!("Task {} updated", task.id);
        Ok(task)
    }

    /// Remove a task; unknown ids are a no-op
    pub async fn delete(&self, id: u64) -> crate::Result<()> {
        if self.backend.delete(id).await? {
            info!("Task {} deleted", id);
        } else {
            debug!("Delete of unknown task {} ignored", id);
        }
        Ok(())
    }

    /// Check if the backing store is reachable
    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }
}
