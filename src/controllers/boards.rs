use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::db::models::{Board, Column};
use crate::error::ApiError;
use crate::service::{self, BoardDetail, BoardWithColumns};
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateBoardRequest {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    column_ids: Vec<String>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Json(body): Json<CreateBoardRequest>,
) -> Result<Json<BoardWithColumns>, ApiError> {
    let mut conn = state.pool.get()?;
    let board = service::create_board(
        &mut conn,
        &user_id,
        body.name.as_deref().unwrap_or(""),
        body.description.as_deref(),
    )?;
    Ok(Json(board))
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
) -> Result<Json<Vec<Board>>, ApiError> {
    let mut conn = state.pool.get()?;
    let boards = service::list_boards(&mut conn, &user_id)?;
    Ok(Json(boards))
}

pub async fn show(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDetail>, ApiError> {
    let mut conn = state.pool.get()?;
    let board = service::get_board(&mut conn, &user_id, &board_id)?;
    Ok(Json(board))
}

pub async fn destroy(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut conn = state.pool.get()?;
    service::delete_board(&mut conn, &user_id, &board_id)?;
    Ok(Json(json!({ "success": true })))
}

/// The authoritative reorder call: the client submits the complete final
/// column order it computed locally, once.
pub async fn reorder_columns(
    State(state): State<AppState>,
    AuthUser { user_id }: AuthUser,
    Path(board_id): Path<String>,
    Json(body): Json<ReorderColumnsRequest>,
) -> Result<Json<Vec<Column>>, ApiError> {
    let mut conn = state.pool.get()?;
    let columns = service::reorder_columns(&mut conn, &user_id, &board_id, &body.column_ids)?;
    Ok(Json(columns))
}
