//! Memory

use crate::storage::StorageBackend;
use crate::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct MemoryState {
    tasks: Vec<Task>,
    next_id: u64,
}

/// In-memory storage backend implementation
#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                tasks: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of tasks currently held
    pub async fn len(&self) -> usize {
        self.state.read().await.tasks.len()
    }

    /// Check if no tasks are held
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn insert(&self, task: NewTask) -> crate::Result<Task> {
        let mut state = self.state.write().await;
        let task = Task::from_new(state.next_id, task);
        state.next_id += 1;
        state.tasks.push(task.clone());
        debug!("Task {} stored in memory", task.id);
        Ok(task)
    }

    async fn list(&self) -> crate::Result<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.clone())
    }

    async fn update(&self, id: u64, changes: TaskChanges) -> crate::Result<Task> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(crate::TaskManagerError::TaskNotFound(id))?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete(&self, id: u64) -> crate::Result<bool> {
        let mut state = self.state.write().await;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        Ok(state.tasks.len() < before)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
