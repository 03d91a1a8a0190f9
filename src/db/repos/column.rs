use diesel::prelude::*;

use crate::db::models::{Board, Column, ColumnChangeSet, NewColumn};
use crate::db::schema::{boards, columns};

pub fn insert_many(conn: &mut PgConnection, new_columns: &[NewColumn<'_>]) -> QueryResult<Vec<Column>> {
    diesel::insert_into(columns::table)
        .values(new_columns)
        .get_results(conn)
}

/// Resolves a column together with its owning board, one hop of the
/// ownership chain.
pub fn find_with_board(
    conn: &mut PgConnection,
    column_id: &str,
) -> QueryResult<Option<(Column, Board)>> {
    columns::table
        .inner_join(boards::table)
        .filter(columns::id.eq(column_id))
        .first::<(Column, Board)>(conn)
        .optional()
}

/// Siblings of one board in rank order.
pub fn list_for_board(conn: &mut PgConnection, board_id: &str) -> QueryResult<Vec<Column>> {
    columns::table
        .filter(columns::board_id.eq(board_id))
        .order(columns::ordinal.asc())
        .load(conn)
}

pub fn update(
    conn: &mut PgConnection,
    column_id: &str,
    change_set: &ColumnChangeSet,
) -> QueryResult<Column> {
    diesel::update(columns::table.filter(columns::id.eq(column_id)))
        .set(change_set)
        .get_result(conn)
}

/// Single-field order write, issued once per affected sibling after a
/// reorder.
pub fn set_ordinal(conn: &mut PgConnection, column_id: &str, ordinal: i32) -> QueryResult<usize> {
    diesel::update(columns::table.filter(columns::id.eq(column_id)))
        .set(columns::ordinal.eq(ordinal))
        .execute(conn)
}

pub fn delete(conn: &mut PgConnection, column_id: &str) -> QueryResult<usize> {
    diesel::delete(columns::table.filter(columns::id.eq(column_id))).execute(conn)
}

pub fn delete_for_board(conn: &mut PgConnection, board_id: &str) -> QueryResult<usize> {
    diesel::delete(columns::table.filter(columns::board_id.eq(board_id))).execute(conn)
}
