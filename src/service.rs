//! Board aggregate operations. Every entry point takes the acting user id
//! explicitly, authorizes through the ownership guard before any mutation,
//! and then drives the repos. Cascading deletes run in one transaction;
//! bulk order writes deliberately do not (see `persist_ranks`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::{Connection, PgConnection};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::db::models::{
    Board, Column, ColumnChangeSet, Label, NewBoard, NewColumn, NewTask, Priority, Task,
    TaskChangeSet,
};
use crate::db::repos;
use crate::error::ApiError;
use crate::guard;
use crate::ordering::{self, Ordered};

/// Seed columns for a fresh board, in rank order.
pub const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

impl Ordered for Column {
    fn rank(&self) -> i32 {
        self.ordinal
    }
    fn set_rank(&mut self, rank: i32) {
        self.ordinal = rank;
    }
}

#[derive(Serialize)]
pub struct BoardWithColumns {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<Column>,
}

#[derive(Serialize)]
pub struct TaskWithLabels {
    #[serde(flatten)]
    pub task: Task,
    pub labels: Vec<Label>,
}

#[derive(Serialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<TaskWithLabels>,
}

#[derive(Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<ColumnWithTasks>,
}

#[derive(Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub labels: Vec<Label>,
    pub column: Column,
}

/// Partial update for a column. `order` is a move-to-index, not a blind
/// field write: the whole sibling list is respliced around it.
#[derive(Deserialize, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub order: Option<i32>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: Option<String>,
    pub column_id: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a task. An absent field is left untouched; for the
/// nullable fields an explicit JSON `null` clears the value.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch_field")]
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "patch_field")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub column_id: Option<String>,
}

/// Keeps serde from collapsing "field present and null" into "field
/// absent": a present field always deserializes to `Some(_)`.
fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn create_board(
    conn: &mut PgConnection,
    actor_id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<BoardWithColumns, ApiError> {
    if name.is_empty() {
        return Err(ApiError::Validation(String::from("Name is required")));
    }

    conn.transaction::<_, ApiError, _>(|conn| {
        let board_id = Uuid::new_v4().to_string();
        let board = repos::board::insert(
            conn,
            NewBoard {
                id: &board_id,
                name,
                description,
                user_id: actor_id,
            },
        )?;

        let column_ids: Vec<String> = DEFAULT_COLUMNS
            .iter()
            .map(|_| Uuid::new_v4().to_string())
            .collect();
        let seeds: Vec<NewColumn<'_>> = DEFAULT_COLUMNS
            .iter()
            .zip(&column_ids)
            .enumerate()
            .map(|(index, (&column_name, id))| NewColumn {
                id: id.as_str(),
                name: column_name,
                ordinal: index as i32,
                board_id: &board.id,
            })
            .collect();
        let columns = repos::column::insert_many(conn, &seeds)?;

        debug!(board_id = %board.id, "created board");
        Ok(BoardWithColumns { board, columns })
    })
}

pub fn list_boards(conn: &mut PgConnection, actor_id: &str) -> Result<Vec<Board>, ApiError> {
    Ok(repos::board::list_for_user(conn, actor_id)?)
}

pub fn get_board(
    conn: &mut PgConnection,
    actor_id: &str,
    board_id: &str,
) -> Result<BoardDetail, ApiError> {
    let board = guard::board(conn, actor_id, board_id)?;
    let columns = repos::column::list_for_board(conn, &board.id)?;

    let column_ids: Vec<String> = columns.iter().map(|column| column.id.clone()).collect();
    let tasks = repos::task::list_for_columns(conn, &column_ids)?;
    let task_ids: Vec<String> = tasks.iter().map(|task| task.id.clone()).collect();

    let mut labels_by_task: HashMap<String, Vec<Label>> = HashMap::new();
    for label in repos::label::list_for_tasks(conn, &task_ids)? {
        labels_by_task.entry(label.task_id.clone()).or_default().push(label);
    }

    // Tasks arrive newest-first; keep that order while bucketing per column.
    let mut tasks_by_column: HashMap<String, Vec<TaskWithLabels>> = HashMap::new();
    for task in tasks {
        let labels = labels_by_task.remove(&task.id).unwrap_or_default();
        tasks_by_column
            .entry(task.column_id.clone())
            .or_default()
            .push(TaskWithLabels { task, labels });
    }

    let columns = columns
        .into_iter()
        .map(|column| {
            let tasks = tasks_by_column.remove(&column.id).unwrap_or_default();
            ColumnWithTasks { column, tasks }
        })
        .collect();

    Ok(BoardDetail { board, columns })
}

pub fn delete_board(
    conn: &mut PgConnection,
    actor_id: &str,
    board_id: &str,
) -> Result<(), ApiError> {
    let board = guard::board(conn, actor_id, board_id)?;
    conn.transaction::<_, ApiError, _>(|conn| {
        let columns = repos::column::list_for_board(conn, &board.id)?;
        let column_ids: Vec<String> = columns.iter().map(|column| column.id.clone()).collect();
        let tasks = repos::task::list_for_columns(conn, &column_ids)?;
        let task_ids: Vec<String> = tasks.iter().map(|task| task.id.clone()).collect();

        repos::label::delete_for_tasks(conn, &task_ids)?;
        repos::task::delete_for_columns(conn, &column_ids)?;
        repos::column::delete_for_board(conn, &board.id)?;
        repos::board::delete(conn, &board.id)?;
        debug!(board_id = %board.id, "deleted board");
        Ok(())
    })
}

pub fn update_column(
    conn: &mut PgConnection,
    actor_id: &str,
    column_id: &str,
    patch: ColumnPatch,
) -> Result<Column, ApiError> {
    let (mut column, board) = guard::column(conn, actor_id, column_id)?;

    if let Some(name) = patch.name {
        column = repos::column::update(conn, column_id, &ColumnChangeSet { name: Some(name) })?;
    }

    if let Some(target) = patch.order {
        column = move_column(conn, &board.id, column_id, target)?;
    }

    Ok(column)
}

/// Moves a column to the given index among its siblings, persisting one
/// order write per shifted sibling. A target equal to the current index
/// issues no writes at all.
fn move_column(
    conn: &mut PgConnection,
    board_id: &str,
    column_id: &str,
    target: i32,
) -> Result<Column, ApiError> {
    let mut siblings = repos::column::list_for_board(conn, board_id)?;
    let from = siblings
        .iter()
        .position(|column| column.id == column_id)
        .ok_or(ApiError::NotFound("Column"))?;
    let to = if target < 0 { 0 } else { target as usize };

    if ordering::reorder(&mut siblings, from, to) {
        persist_ranks(conn, &mut siblings)?;
    }

    siblings
        .into_iter()
        .find(|column| column.id == column_id)
        .ok_or(ApiError::NotFound("Column"))
}

/// Issues the independent per-sibling order writes. These are deliberately
/// not one transaction: a failure mid-way leaves the rest applied, and the
/// error names the columns still holding stale ranks so the caller can
/// reissue the whole (idempotent) reorder.
fn persist_ranks(conn: &mut PgConnection, siblings: &mut [Column]) -> Result<(), ApiError> {
    let changed = ordering::reassign(siblings);
    let mut failed = Vec::new();
    for index in changed {
        let column = &siblings[index];
        if let Err(err) = repos::column::set_ordinal(conn, &column.id, column.ordinal) {
            tracing::error!(column_id = %column.id, error = %err, "order write failed");
            failed.push(column.id.clone());
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ReorderIncomplete { failed })
    }
}

/// Applies a client-proposed final column order to a board. The proposal
/// must be a permutation of the board's current columns.
pub fn reorder_columns(
    conn: &mut PgConnection,
    actor_id: &str,
    board_id: &str,
    ordered_ids: &[String],
) -> Result<Vec<Column>, ApiError> {
    let board = guard::board(conn, actor_id, board_id)?;
    let siblings = repos::column::list_for_board(conn, &board.id)?;
    let mut arranged = ordering::arrange(siblings, ordered_ids, |column| column.id.as_str())
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    persist_ranks(conn, &mut arranged)?;
    debug!(board_id = %board.id, "reordered columns");
    Ok(arranged)
}

pub fn delete_column(
    conn: &mut PgConnection,
    actor_id: &str,
    column_id: &str,
) -> Result<(), ApiError> {
    let (column, _board) = guard::column(conn, actor_id, column_id)?;
    conn.transaction::<_, ApiError, _>(|conn| {
        // Children first: no orphaned tasks may ever persist.
        let task_ids = repos::task::list_ids_for_column(conn, &column.id)?;
        repos::label::delete_for_tasks(conn, &task_ids)?;
        repos::task::delete_for_column(conn, &column.id)?;
        repos::column::delete(conn, &column.id)?;
        debug!(column_id = %column.id, "deleted column");
        Ok(())
    })
}

pub fn create_task(
    conn: &mut PgConnection,
    actor_id: &str,
    input: CreateTask,
) -> Result<TaskWithLabels, ApiError> {
    let title = input.title.as_deref().unwrap_or("");
    let column_id = input.column_id.as_deref().unwrap_or("");
    if title.is_empty() || column_id.is_empty() {
        return Err(ApiError::Validation(String::from(
            "Title and columnId are required",
        )));
    }

    let (column, board) = guard::column(conn, actor_id, column_id)?;
    let task = repos::task::insert(
        conn,
        NewTask {
            id: &Uuid::new_v4().to_string(),
            title,
            description: input.description.as_deref(),
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            column_id: &column.id,
            // The task owner is pinned to the board owner, never the raw
            // actor, so the chain invariant holds by construction.
            user_id: &board.user_id,
        },
    )?;
    debug!(task_id = %task.id, column_id = %column.id, "created task");
    Ok(TaskWithLabels { task, labels: Vec::new() })
}

pub fn get_task(
    conn: &mut PgConnection,
    actor_id: &str,
    task_id: &str,
) -> Result<TaskDetail, ApiError> {
    let (task, column) = guard::task(conn, actor_id, task_id)?;
    let labels = repos::label::list_for_task(conn, &task.id)?;
    Ok(TaskDetail { task, labels, column })
}

pub fn update_task(
    conn: &mut PgConnection,
    actor_id: &str,
    task_id: &str,
    patch: TaskPatch,
) -> Result<TaskWithLabels, ApiError> {
    let (task, _column) = guard::task(conn, actor_id, task_id)?;

    // A container change re-runs the guard against the new column's board
    // before anything is written; a cross-owner move leaves the task row
    // untouched.
    if let Some(new_column_id) = patch.column_id.as_deref() {
        if new_column_id != task.column_id {
            guard::column(conn, actor_id, new_column_id)?;
        }
    }

    let change_set = TaskChangeSet {
        title: patch.title,
        description: patch.description,
        priority: patch.priority,
        due_date: patch.due_date,
        column_id: patch.column_id,
        updated_at: Some(Utc::now()),
    };
    let task = repos::task::update(conn, task_id, &change_set)?;
    let labels = repos::label::list_for_task(conn, &task.id)?;
    debug!(task_id = %task.id, "updated task");
    Ok(TaskWithLabels { task, labels })
}

pub fn delete_task(
    conn: &mut PgConnection,
    actor_id: &str,
    task_id: &str,
) -> Result<(), ApiError> {
    let (task, _column) = guard::task(conn, actor_id, task_id)?;
    conn.transaction::<_, ApiError, _>(|conn| {
        repos::label::delete_for_task(conn, &task.id)?;
        repos::task::delete(conn, &task.id)?;
        debug!(task_id = %task.id, "deleted task");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_boards_seed_the_three_standard_columns() {
        assert_eq!(DEFAULT_COLUMNS, ["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn task_patch_distinguishes_absent_from_null() {
        let patch: TaskPatch = serde_json::from_str(r#"{"priority":"HIGH"}"#).unwrap();
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert!(patch.due_date.is_none());
        assert!(patch.column_id.is_none());
        assert_eq!(patch.priority, Some(Priority::High));

        let patch: TaskPatch =
            serde_json::from_str(r#"{"description":null,"dueDate":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.due_date, Some(None));
    }

    #[test]
    fn task_patch_carries_present_values() {
        let patch: TaskPatch =
            serde_json::from_str(r#"{"description":"notes","columnId":"c-2"}"#).unwrap();
        assert_eq!(patch.description, Some(Some(String::from("notes"))));
        assert_eq!(patch.column_id.as_deref(), Some("c-2"));
    }

    #[test]
    fn column_patch_accepts_rename_and_move_independently() {
        let patch: ColumnPatch = serde_json::from_str(r#"{"order":2}"#).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.order, Some(2));
    }
}
