use serde::{Deserialize, Serialize};

/// Message returned whenever a create or update arrives without a usable name
pub const NAME_REQUIRED: &str = "Task name is required";

/// A task held by the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Repository-assigned identifier, stable for the task's lifetime
    pub id: u64,

    /// Task name, never empty
    pub name: String,

    /// Free-form description, empty when not given
    #[serde(default)]
    pub description: String,
}

/// Body of a create or update request before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskInput {
    /// Requested task name
    #[serde(default)]
    pub name: Option<String>,

    /// Requested description
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated task waiting for an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task name
    pub name: String,

    /// Task description
    pub description: String,
}

/// A validated replacement for an existing task's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New name
    pub name: String,

    /// New description; `None` keeps the stored one
    pub description: Option<String>,
}

impl Task {
    /// Assemble a stored task from its id and validated fields
    pub fn from_new(id: u64, new_task: NewTask) -> Self {
        Self {
            id,
            name: new_task.name,
            description: new_task.description,
        }
    }

    /// Apply an update in place; the id never changes
    pub fn apply(&mut self, changes: TaskChanges) {
        self.name = changes.name;
        if let Some(description) = changes.description {
            self.description = description;
        }
    }
}

impl TaskInput {
    /// Create a new input with a name and optional description
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            description: description.map(str::to_string),
        }
    }

    /// Validate for `create`; the description defaults to an empty string
    pub fn into_new_task(self) -> crate::Result<NewTask> {
        let name = Self::required_name(self.name)?;
        Ok(NewTask {
            name,
            description: self.description.unwrap_or_default(),
        })
    }

    /// Validate for `update`; an absent description is left untouched
    pub fn into_changes(self) -> crate::Result<TaskChanges> {
        let name = Self::required_name(self.name)?;
        Ok(TaskChanges {
            name,
            description: self.description,
        })
    }

    fn required_name(name: Option<String>) -> crate::Result<String> {
        match name {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(crate::TaskManagerError::Validation(NAME_REQUIRED.to_string())),
        }
    }
}

impl NewTask {
    /// Create a validated task directly, bypassing `TaskInput`
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl TaskChanges {
    /// Create a validated update directly, bypassing `TaskInput`
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
        }
    }
}
