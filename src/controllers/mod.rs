pub mod boards;
pub mod columns;
pub mod tasks;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/boards", post(boards::create).get(boards::list))
        .route("/boards/:id", get(boards::show).delete(boards::destroy))
        .route("/boards/:id/columns/order", put(boards::reorder_columns))
        .route("/columns/:id", patch(columns::update).delete(columns::destroy))
        .route("/tasks", post(tasks::create))
        .route(
            "/tasks/:id",
            get(tasks::show).patch(tasks::update).delete(tasks::destroy),
        )
        .with_state(state)
}
