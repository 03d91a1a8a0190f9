use diesel::prelude::*;

use crate::db::models::Label;
use crate::db::schema::labels;

pub fn list_for_task(conn: &mut PgConnection, task_id: &str) -> QueryResult<Vec<Label>> {
    labels::table.filter(labels::task_id.eq(task_id)).load(conn)
}

pub fn list_for_tasks(conn: &mut PgConnection, task_ids: &[String]) -> QueryResult<Vec<Label>> {
    labels::table
        .filter(labels::task_id.eq_any(task_ids))
        .load(conn)
}

pub fn delete_for_task(conn: &mut PgConnection, task_id: &str) -> QueryResult<usize> {
    diesel::delete(labels::table.filter(labels::task_id.eq(task_id))).execute(conn)
}

pub fn delete_for_tasks(conn: &mut PgConnection, task_ids: &[String]) -> QueryResult<usize> {
    diesel::delete(labels::table.filter(labels::task_id.eq_any(task_ids))).execute(conn)
}
