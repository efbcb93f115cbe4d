use crate::TaskManagerError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Body text for lookups of unknown ids
pub const TASK_NOT_FOUND: &str = "Task not found";

/// A repository failure rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError(pub TaskManagerError);

impl ApiError {
    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self.0 {
            TaskManagerError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskManagerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskManagerError> for ApiError {
    fn from(err: TaskManagerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.0 {
            TaskManagerError::Validation(msg) => msg,
            TaskManagerError::TaskNotFound(_) => TASK_NOT_FOUND.to_string(),
            other => {
                error!("Request failed: {}", other);
                other.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
