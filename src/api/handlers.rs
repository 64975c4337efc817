//! HTTP endpoint handlers

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::responses::{ApiResponse, HealthResponse, StatusResponse};
use crate::state::{AppState, QueueError};

/// JSON body for add/edit requests, mirroring the original form fields
#[derive(Debug, Clone, Deserialize)]
pub struct TaskForm {
    pub name: String,
    #[serde(default)]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
}

const MAX_NAME_CHARS: usize = 40;
const MAX_MINUTES: u64 = 600;
const MAX_SECONDS: u64 = 59;

/// Input constraints carried over from the original form. These live at the
/// API boundary; the store only validates the zero-duration case.
fn validate_form(form: &TaskForm) -> Result<String, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Task name must not be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(format!(
            "Task name must be at most {} characters",
            MAX_NAME_CHARS
        ));
    }
    if form.minutes > MAX_MINUTES {
        return Err(format!("Minutes must be at most {}", MAX_MINUTES));
    }
    if form.seconds > MAX_SECONDS {
        return Err(format!("Seconds must be at most {}", MAX_SECONDS));
    }
    Ok(name.to_string())
}

/// Build an inline error response carrying the unchanged queue snapshot
fn rejection(state: &AppState, message: String) -> Result<Json<ApiResponse>, StatusCode> {
    match state.snapshot() {
        Ok(snapshot) => {
            info!("Request rejected: {}", message);
            Ok(Json(ApiResponse::error(
                message,
                snapshot.tasks,
                snapshot.run,
            )))
        }
        Err(e) => {
            error!("Failed to get queue snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /tasks - Append a task to the queue
pub async fn add_task_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TaskForm>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let name = match validate_form(&form) {
        Ok(name) => name,
        Err(message) => return rejection(&state, message),
    };

    match state.update_queue("add", |store| {
        store.add_task(&name, form.minutes, form.seconds)
    }) {
        Ok(Ok(task)) => {
            info!(
                "Queued task '{}' ({}s countdown)",
                task.name, task.seconds_left
            );
            match state.snapshot() {
                Ok(snapshot) => Ok(Json(ApiResponse::ok(
                    format!("Task '{}' queued", task.name),
                    snapshot.tasks,
                    snapshot.run,
                ))),
                Err(e) => {
                    error!("Failed to get queue snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Ok(Err(e)) => rejection(&state, e.to_string()),
        Err(e) => {
            error!("Failed to add task: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /tasks/:index - Replace a task in place
pub async fn edit_task_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(form): Json<TaskForm>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let name = match validate_form(&form) {
        Ok(name) => name,
        Err(message) => return rejection(&state, message),
    };

    match state.update_queue("edit", |store| {
        store.edit_task(index, &name, form.minutes, form.seconds)
    }) {
        Ok(Ok(task)) => {
            info!("Edited task at index {}: '{}'", index, task.name);
            match state.snapshot() {
                Ok(snapshot) => Ok(Json(ApiResponse::ok(
                    format!("Task '{}' updated", task.name),
                    snapshot.tasks,
                    snapshot.run,
                ))),
                Err(e) => {
                    error!("Failed to get queue snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Ok(Err(QueueError::IndexOutOfRange { index, len })) => {
            // Well-behaved clients never request a vanished index
            warn!("Edit requested for index {} but queue holds {}", index, len);
            Err(StatusCode::NOT_FOUND)
        }
        Ok(Err(e)) => rejection(&state, e.to_string()),
        Err(e) => {
            error!("Failed to edit task: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle DELETE /tasks/:index - Remove a task; deleting the head stops the run
pub async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.update_queue("delete", |store| store.delete_task(index)) {
        Ok(Ok(task)) => {
            info!("Deleted task '{}' at index {}", task.name, index);
            match state.snapshot() {
                Ok(snapshot) => Ok(Json(ApiResponse::ok(
                    format!("Task '{}' deleted", task.name),
                    snapshot.tasks,
                    snapshot.run,
                ))),
                Err(e) => {
                    error!("Failed to get queue snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Ok(Err(QueueError::IndexOutOfRange { index, len })) => {
            warn!("Delete requested for index {} but queue holds {}", index, len);
            Err(StatusCode::NOT_FOUND)
        }
        Ok(Err(e)) => rejection(&state, e.to_string()),
        Err(e) => {
            error!("Failed to delete task: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Restore the head countdown and stop the run
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.update_queue("reset", |store| store.reset_head()) {
        Ok(()) => {
            info!("Reset endpoint called - head countdown restored, run stopped");
            match state.snapshot() {
                Ok(snapshot) => Ok(Json(ApiResponse::ok(
                    "Head task reset and run stopped".to_string(),
                    snapshot.tasks,
                    snapshot.run,
                ))),
                Err(e) => {
                    error!("Failed to get queue snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Err(e) => {
            error!("Failed to reset head task: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Play/pause the countdown
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.update_queue("toggle", |store| store.toggle_run(Instant::now())) {
        Ok(run) => {
            let message = if run.is_active {
                "Run started"
            } else if run.is_stopped {
                "Queue is empty, nothing to run"
            } else {
                "Run paused"
            };
            info!("Toggle endpoint called - {}", message.to_lowercase());
            match state.snapshot() {
                Ok(snapshot) => Ok(Json(ApiResponse::ok(
                    message.to_string(),
                    snapshot.tasks,
                    snapshot.run,
                ))),
                Err(e) => {
                    error!("Failed to get queue snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        Err(e) => {
            error!("Failed to toggle run state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the queue, run flags and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get queue snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        tasks: snapshot.tasks,
        run: snapshot.run,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
