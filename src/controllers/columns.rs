use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::db::models::Column;
use crate::error::ApiError;
use crate::service::{self, ColumnPatch};
use crate::AppState;

pub async fn update(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(column_id): Path<String>,
    Json(patch): Json<ColumnPatch>,
) -> Result<Json<Column>, ApiError> {
    let mut conn = state.pool.get()?;
    let column = service::update_column(&mut conn, &user_id, &column_id, patch)?;
    Ok(Json(column))
}

pub async fn destroy(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(column_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut conn = state.pool.get()?;
    service::delete_column(&mut conn, &user_id, &column_id)?;
    Ok(Json(json!({ "success": true })))
}
