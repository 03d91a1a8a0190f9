use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::service::{self, CreateTask, TaskDetail, TaskPatch, TaskWithLabels};
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Json(body): Json<CreateTask>,
) -> Result<Json<TaskWithLabels>, ApiError> {
    let mut conn = state.pool.get()?;
    let task = service::create_task(&mut conn, &user_id, body)?;
    Ok(Json(task))
}

pub async fn show(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(task_id): Path<String>,
) -> Result<Json<TaskDetail>, ApiError> {
    let mut conn = state.pool.get()?;
    let task = service::get_task(&mut conn, &user_id, &task_id)?;
    Ok(Json(task))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(task_id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<TaskWithLabels>, ApiError> {
    let mut conn = state.pool.get()?;
    let task = service::update_task(&mut conn, &user_id, &task_id, patch)?;
    Ok(Json(task))
}

pub async fn destroy(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut conn = state.pool.get()?;
    service::delete_task(&mut conn, &user_id, &task_id)?;
    Ok(Json(json!({ "success": true })))
}
