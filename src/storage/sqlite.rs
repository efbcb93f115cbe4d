//! SQLite storage

use crate::storage::{sql_key, StorageBackend};
use crate::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

pub(crate) const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
)";
const INSERT_TASK: &str = "INSERT INTO tasks (name, description) VALUES (?1, ?2)";
const SELECT_TASKS: &str = "SELECT id, name, description FROM tasks ORDER BY id";
const SELECT_TASK: &str = "SELECT id, name, description FROM tasks WHERE id = ?1";
const UPDATE_TASK: &str =
    "UPDATE tasks SET name = ?1, description = COALESCE(?2, description) WHERE id = ?3";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// SQLite-backed storage
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Open the database file at `path`, creating the table if needed
    pub async fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || Self::with_connection(Connection::open(path)?))
            .await
            .map_err(|e| crate::TaskManagerError::StorageError(e.to_string()))?
    }

    /// Open a private in-memory database
    pub fn in_memory() -> crate::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> crate::Result<Self> {
        conn.execute(SCHEMA_TASKS, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> crate::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> crate::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| {
                crate::TaskManagerError::StorageError("sqlite connection poisoned".to_string())
            })?;
            f(&*conn)
        })
        .await
        .map_err(|e| {
            error!("SQLite worker failed: {}", e);
            crate::TaskManagerError::StorageError(e.to_string())
        })?
    }
}

fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let description: Option<String> = row.get(2)?;
    Ok(Task {
        id: id as u64,
        name: row.get(1)?,
        description: description.unwrap_or_default(),
    })
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    async fn insert(&self, task: NewTask) -> crate::Result<Task> {
        self.with_conn(move |conn| {
            conn.execute(INSERT_TASK, params![task.name, task.description])?;
            let id = conn.last_insert_rowid() as u64;
            debug!("Task {} inserted into sqlite", id);
            Ok(Task::from_new(id, task))
        })
        .await
    }

    async fn list(&self) -> crate::Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(SELECT_TASKS)?;
            let tasks = stmt
                .query_map([], row_to_task)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
        .await
    }

    async fn update(&self, id: u64, changes: TaskChanges) -> crate::Result<Task> {
        let key = sql_key(id).ok_or(crate::TaskManagerError::TaskNotFound(id))?;
        self.with_conn(move |conn| {
            let affected =
                conn.execute(UPDATE_TASK, params![changes.name, changes.description, key])?;
            if affected == 0 {
                return Err(crate::TaskManagerError::TaskNotFound(id));
            }
            conn.query_row(SELECT_TASK, params![key], row_to_task)
                .optional()?
                .ok_or(crate::TaskManagerError::TaskNotFound(id))
        })
        .await
    }

    async fn delete(&self, id: u64) -> crate::Result<bool> {
        let Some(key) = sql_key(id) else {
            return Ok(false);
        };
        self.with_conn(move |conn| {
            let affected = conn.execute(DELETE_TASK, params![key])?;
            Ok(affected > 0)
        })
        .await
    }

    async fn health_check(&self) -> bool {
        self.with_conn(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .await
            .is_ok()
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}
