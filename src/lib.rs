//! Task Manager RS - A task-management HTTP API over swappable storage
//!
//! This library provides a storage-agnostic task repository with in-memory,
//! JSON file, SQLite and remote SQL-over-HTTP backends, plus the HTTP layer
//! that exposes it.

/// HTTP routes and server lifecycle
pub mod api;
/// Configuration management for the task manager
pub mod config;
/// Repository enforcing the task contract on top of a backend
pub mod repository;
/// Storage backend implementations
pub mod storage;
/// Task definitions and request validation
pub mod task;

pub use config::Config;
pub use repository::TaskRepository;
pub use storage::memory::MemoryBackend;
pub use task::{NewTask, Task, TaskChanges, TaskInput};

use thiserror::Error;

/// Result type for task manager operations
pub type Result<T> = std::result::Result<T, TaskManagerError>;

/// Error types for the task manager
#[derive(Error, Debug)]
pub enum TaskManagerError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// Task with the specified ID was not found
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    /// Storage backend error occurred
    #[error("Storage error: {0}")]
    StorageError(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Filesystem error from the file backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Transport error talking to the remote SQL service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote SQL service rejected a statement
    #[error("Remote store error: {0}")]
    RemoteError(String),

    /// HTTP server failed or did not shut down in time
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
