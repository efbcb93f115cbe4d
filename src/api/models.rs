use crate::task::Task;
use serde::Serialize;

/// A confirmation carrying the affected task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Human-readable outcome, e.g. "Task added"
    pub message: String,
    /// The task as stored after the operation
    pub task: Task,
}

/// A bare confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Result of a backend health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` or `unavailable`
    pub status: &'static str,
    /// Kind of the storage backend in use
    pub backend: &'static str,
}

impl TaskResponse {
    /// Confirmation for a newly created task
    pub fn added(task: Task) -> Self {
        Self {
            message: "Task added".to_string(),
            task,
        }
    }

    /// Confirmation for an updated task
    pub fn updated(task: Task) -> Self {
        Self {
            message: "Task updated".to_string(),
            task,
        }
    }
}

impl MessageResponse {
    /// Confirmation for a delete, whether or not the task existed
    pub fn deleted(id: u64) -> Self {
        Self {
            message: format!("Task with id {} deleted", id),
        }
    }
}
