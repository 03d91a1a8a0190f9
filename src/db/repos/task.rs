use diesel::prelude::*;

use crate::db::models::{Board, Column, NewTask, Task, TaskChangeSet};
use crate::db::schema::{boards, columns, tasks};

pub fn insert(conn: &mut PgConnection, new_task: NewTask<'_>) -> QueryResult<Task> {
    diesel::insert_into(tasks::table)
        .values(new_task)
        .get_result(conn)
}

/// Resolves a task with its full ownership chain up to the root board.
pub fn find_with_chain(
    conn: &mut PgConnection,
    task_id: &str,
) -> QueryResult<Option<(Task, Column, Board)>> {
    let row: Option<(Task, (Column, Board))> = tasks::table
        .inner_join(columns::table.inner_join(boards::table))
        .filter(tasks::id.eq(task_id))
        .first(conn)
        .optional()?;
    Ok(row.map(|(task, (column, board))| (task, column, board)))
}

/// Tasks of the given columns, newest first. Intra-column rank is not
/// persisted, so creation time is the display order.
pub fn list_for_columns(conn: &mut PgConnection, column_ids: &[String]) -> QueryResult<Vec<Task>> {
    tasks::table
        .filter(tasks::column_id.eq_any(column_ids))
        .order(tasks::created_at.desc())
        .load(conn)
}

pub fn list_ids_for_column(conn: &mut PgConnection, column_id: &str) -> QueryResult<Vec<String>> {
    tasks::table
        .filter(tasks::column_id.eq(column_id))
        .select(tasks::id)
        .load(conn)
}

pub fn update(
    conn: &mut PgConnection,
    task_id: &str,
    change_set: &TaskChangeSet,
) -> QueryResult<Task> {
    diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
        .set(change_set)
        .get_result(conn)
}

pub fn delete(conn: &mut PgConnection, task_id: &str) -> QueryResult<usize> {
    diesel::delete(tasks::table.filter(tasks::id.eq(task_id))).execute(conn)
}

pub fn delete_for_column(conn: &mut PgConnection, column_id: &str) -> QueryResult<usize> {
    diesel::delete(tasks::table.filter(tasks::column_id.eq(column_id))).execute(conn)
}

pub fn delete_for_columns(conn: &mut PgConnection, column_ids: &[String]) -> QueryResult<usize> {
    diesel::delete(tasks::table.filter(tasks::column_id.eq_any(column_ids))).execute(conn)
}
