use crate::api::models::{HealthResponse, MessageResponse, TaskResponse};
use crate::api::{ApiError, AppState};
use crate::task::{Task, TaskInput, NAME_REQUIRED};
use crate::TaskManagerError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

/// Plain-text landing page
pub const HOME_TEXT: &str = "Task Manager - Use the API to manage tasks";

/// A body that is absent or not a JSON object counts as a missing name
fn task_input(payload: Result<Json<TaskInput>, JsonRejection>) -> Result<TaskInput, ApiError> {
    payload.map(|Json(input)| input).map_err(|rejection| {
        debug!("Unusable task body: {}", rejection);
        ApiError(TaskManagerError::Validation(NAME_REQUIRED.to_string()))
    })
}

/// Ids that are not a valid task id can never match a task
fn task_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!("Unusable task id: {}", rejection);
        ApiError(TaskManagerError::TaskNotFound(0))
    })
}

/// GET /
pub async fn home() -> &'static str {
    info!("Rendered home page");
    HOME_TEXT
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.repository.backend_kind();
    if state.repository.health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                backend,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                backend,
            }),
        )
    }
}

/// POST /tasks
pub async fn add_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    info!("Received request for /tasks POST method - used to add new task");
    let task = state.repository.create(task_input(payload)?).await?;
    info!("Completed request for /tasks POST method - used to add new task");
    Ok((StatusCode::CREATED, Json(TaskResponse::added(task))))
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    info!("Received request for /tasks GET method - used to fetch all tasks");
    let tasks = state.repository.list().await?;
    info!("Completed request for /tasks GET method - used to fetch all tasks");
    Ok(Json(tasks))
}

/// PUT /tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    info!("Received request for /tasks PUT method - used to update a task");
    let id = task_id(path)?;
    let task = state.repository.update(id, task_input(payload)?).await?;
    info!("Completed request for /tasks PUT method - used to update a task");
    Ok(Json(TaskResponse::updated(task)))
}

/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("Received request for /tasks DELETE method - used to delete a task");
    let id = task_id(path)?;
    state.repository.delete(id).await?;
    info!("Completed request for /tasks DELETE method - used to delete a task");
    Ok(Json(MessageResponse::deleted(id)))
}
