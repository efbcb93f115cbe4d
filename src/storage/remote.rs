//! Remote SQL-over-HTTP storage
//!
//! Talks to an rqlite-compatible service. Statements are sent as JSON arrays
//! of `[sql, arg, ...]` to `/db/execute` (writes) and `/db/query` (reads);
//! every response carries one result object per statement.

use crate::storage::sqlite::SCHEMA_TASKS;
use crate::storage::{sql_key, StorageBackend};
use crate::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

const BODY_PREVIEW_LIMIT: usize = 256;

#[derive(Debug, Deserialize)]
struct StatementResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatementResult {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    last_insert_id: Option<i64>,
    #[serde(default)]
    rows_affected: Option<u64>,
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

/// Storage backed by a remote SQL service reached over HTTP
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteBackend {
    /// Connect to the service at `base_url` and make sure the table exists
    pub async fn connect(base_url: &str, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let backend = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        };
        backend.execute(json!([[SCHEMA_TASKS]])).await?;
        debug!("Remote task table ready at {}", backend.base_url);
        Ok(backend)
    }

    /// Base URL of the remote service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, statements: Value) -> crate::Result<StatementResult> {
        self.send("/db/execute", statements).await
    }

    async fn query(&self, statements: Value) -> crate::Result<StatementResult> {
        self.send("/db/query?level=strong", statements).await
    }

    async fn send(&self, path: &str, statements: Value) -> crate::Result<StatementResult> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(&statements).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Remote store returned {} for {}", status, url);
            return Err(crate::TaskManagerError::RemoteError(format!(
                "status {}: {}",
                status.as_u16(),
                preview_body(&body)
            )));
        }

        let parsed: StatementResponse = serde_json::from_str(&body)?;
        if let Some(message) = parsed.error {
            return Err(crate::TaskManagerError::RemoteError(message));
        }

        let result = parsed.results.into_iter().next().unwrap_or_default();
        match result.error {
            Some(message) => Err(crate::TaskManagerError::RemoteError(message)),
            None => Ok(result),
        }
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

fn row_to_task(row: &[Value]) -> crate::Result<Task> {
    let malformed = || crate::TaskManagerError::RemoteError(format!("malformed task row: {:?}", row));

    let id = row.first().and_then(Value::as_u64).ok_or_else(malformed)?;
    let name = row.get(1).and_then(Value::as_str).ok_or_else(malformed)?;
    let description = row.get(2).and_then(Value::as_str).unwrap_or_default();

    Ok(Task {
        id,
        name: name.to_string(),
        description: description.to_string(),
    })
}

fn rows(result: StatementResult) -> crate::Result<Vec<Task>> {
    result
        .values
        .unwrap_or_default()
        .iter()
        .map(|row| row_to_task(row))
        .collect()
}

#[async_trait]
impl StorageBackend for RemoteBackend {
    async fn insert(&self, task: NewTask) -> crate::Result<Task> {
        let result = self
            .execute(json!([[
                "INSERT INTO tasks (name, description) VALUES (?, ?)",
                task.name,
                task.description
            ]]))
            .await?;

        let id = result
            .last_insert_id
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                crate::TaskManagerError::RemoteError("insert returned no row id".to_string())
            })?;
        debug!("Task {} inserted remotely", id);
        Ok(Task::from_new(id as u64, task))
    }

    async fn list(&self) -> crate::Result<Vec<Task>> {
        let result = self
            .query(json!([["SELECT id, name, description FROM tasks ORDER BY id"]]))
            .await?;
        rows(result)
    }

    async fn update(&self, id: u64, changes: TaskChanges) -> crate::Result<Task> {
        let key = sql_key(id).ok_or(crate::TaskManagerError::TaskNotFound(id))?;
        let result = self
            .execute(json!([[
                "UPDATE tasks SET name = ?, description = COALESCE(?, description) WHERE id = ?",
                changes.name,
                changes.description,
                key
            ]]))
            .await?;
        if result.rows_affected.unwrap_or(0) == 0 {
            return Err(crate::TaskManagerError::TaskNotFound(id));
        }

        let result = self
            .query(json!([[
                "SELECT id, name, description FROM tasks WHERE id = ?",
                key
            ]]))
            .await?;
        rows(result)?
            .into_iter()
            .next()
            .ok_or(crate::TaskManagerError::TaskNotFound(id))
    }

    async fn delete(&self, id: u64) -> crate::Result<bool> {
        let Some(key) = sql_key(id) else {
            return Ok(false);
        };
        let result = self
            .execute(json!([["DELETE FROM tasks WHERE id = ?", key]]))
            .await?;
        Ok(result.rows_affected.unwrap_or(0) > 0)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/status", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                error!("Remote store health check failed: {}", e);
                false
            }
        }
    }

    fn kind(&self) -> &'static str {
        "remote"
    }
}
