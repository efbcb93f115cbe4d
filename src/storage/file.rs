//! JSON file storage
//!
//! The whole collection is one JSON array. Every operation reads the file,
//! applies its change and writes the result back through a temporary file
//! that is renamed over the original, all under one lock.

use crate::storage::StorageBackend;
use crate::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// File-backed storage that persists tasks as a JSON array
pub struct FileBackend {
    path: PathBuf,
    /// Highest id ever handed out by this instance
    high_water: Mutex<u64>,
}

impl FileBackend {
    /// Open (or lazily create) the task file at `path`
    pub async fn open(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let existing = read_tasks(&path).await?;
        let high_water = existing.iter().map(|task| task.id).max().unwrap_or(0);
        debug!(
            "Loaded {} tasks from {} (highest id {})",
            existing.len(),
            path.display(),
            high_water
        );

        Ok(Self {
            path,
            high_water: Mutex::new(high_water),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_tasks(&self, tasks: &[Task]) -> crate::Result<()> {
        let body = serde_json::to_vec_pretty(tasks)?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks.json".to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, &body).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            warn!("Failed to replace {}: {}", self.path.display(), e);
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn read_tasks(path: &Path) -> crate::Result<Vec<Task>> {
    match fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn insert(&self, task: NewTask) -> crate::Result<Task> {
        let mut high_water = self.high_water.lock().await;
        let mut tasks = read_tasks(&self.path).await?;

        let max_on_disk = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        let id = (*high_water).max(max_on_disk) + 1;
        let task = Task::from_new(id, task);
        tasks.push(task.clone());

        self.write_tasks(&tasks).await?;
        *high_water = id;
        debug!("Task {} written to {}", id, self.path.display());
        Ok(task)
    }

    async fn list(&self) -> crate::Result<Vec<Task>> {
        let _guard = self.high_water.lock().await;
        read_tasks(&self.path).await
    }

    async fn update(&self, id: u64, changes: TaskChanges) -> crate::Result<Task> {
        let _guard = self.high_water.lock().await;
        let mut tasks = read_tasks(&self.path).await?;

        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(crate::TaskManagerError::TaskNotFound(id))?;
        task.apply(changes);
        let updated = task.clone();

        self.write_tasks(&tasks).await?;
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> crate::Result<bool> {
        let _guard = self.high_water.lock().await;
        let mut tasks = read_tasks(&self.path).await?;

        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        self.write_tasks(&tasks).await?;
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        let _guard = self.high_water.lock().await;
        read_tasks(&self.path).await.is_ok()
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
