//! HTTP handlers for the task API
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::core::messages::catalog;
use crate::core::state::AppState;
use crate::tasks::error::TaskApiError;
use crate::tasks::types::{
    ApiMessage, Task, TaskListResponse, TaskPayload, TaskResponse, TaskStatus, TaskUpdatedResponse,
};
use crate::tasks::validation::validate_task_payload;

pub async fn handle_task_list(
    State(state): State<Arc<AppState>>,
) -> Result<Response, TaskApiError> {
    let tasks = state.tasks.list().await?;
    Ok(tasks_or_message(tasks))
}

pub async fn handle_task_create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TaskPayload>,
) -> Result<Response, TaskApiError> {
    let draft = validate_task_payload(&payload).map_err(TaskApiError::Validation)?;
    let task = state.tasks.insert(draft).await?;
    info!("Created task {}", task.id);
    Ok((
        StatusCode::CREATED,
        Json(TaskResponse { task, status: 201 }),
    )
        .into_response())
}

pub async fn handle_task_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, TaskApiError> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .tasks
        .find(task_id)
        .await?
        .ok_or(TaskApiError::NotFound)?;
    Ok(Json(TaskResponse { task, status: 200 }))
}

pub async fn handle_task_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskUpdatedResponse>, TaskApiError> {
    let task_id = parse_task_id(&id)?;
    let draft = validate_task_payload(&payload).map_err(TaskApiError::Validation)?;
    let task = state
        .tasks
        .update(task_id, draft)
        .await?
        .ok_or(TaskApiError::NotFound)?;
    info!("Updated task {}", task.id);
    Ok(Json(TaskUpdatedResponse {
        message: catalog().task_updated.clone(),
        task,
        status: 200,
    }))
}

pub async fn handle_task_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, TaskApiError> {
    let task_id = parse_task_id(&id)?;
    if !state.tasks.delete(task_id).await? {
        return Err(TaskApiError::NotFound);
    }
    info!("Deleted task {}", task_id);
    Ok(Json(ApiMessage {
        message: catalog().task_deleted.clone(),
        status: 200,
    }))
}

pub async fn handle_task_filter_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Response, TaskApiError> {
    let status = TaskStatus::parse(&status).ok_or(TaskApiError::InvalidStatus)?;
    let tasks = state.tasks.filter_by_status(status).await?;
    Ok(tasks_or_message(tasks))
}

pub async fn handle_task_filter_due_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Response, TaskApiError> {
    let due_date =
        NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| TaskApiError::InvalidDate)?;
    let tasks = state.tasks.filter_by_due_date(due_date).await?;
    Ok(tasks_or_message(tasks))
}

/// Path ids must be numeric; anything else is rejected before the store is
/// consulted.
fn parse_task_id(raw: &str) -> Result<i32, TaskApiError> {
    raw.parse::<i32>().map_err(|_| TaskApiError::InvalidId)
}

/// The list-shaped endpoints answer with a message envelope instead of an
/// empty array.
fn tasks_or_message(tasks: Vec<Task>) -> Response {
    if tasks.is_empty() {
        Json(ApiMessage {
            message: catalog().no_tasks_found.clone(),
            status: 200,
        })
        .into_response()
    } else {
        Json(TaskListResponse { tasks, status: 200 }).into_response()
    }
}

/// Configure task routes for the Axum router
pub fn configure_task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tasks", post(handle_task_create))
        .route("/api/tasks", get(handle_task_list))
        .route("/api/tasks/:id", get(handle_task_get))
        .route("/api/tasks/:id", put(handle_task_update))
        .route("/api/tasks/:id", delete(handle_task_delete))
        .route(
            "/api/tasks/filter/status/:status",
            get(handle_task_filter_status),
        )
        .route(
            "/api/tasks/filter/due-date/:date",
            get(handle_task_filter_due_date),
        )
}
