use diesel::prelude::*;

use crate::db::models::{Board, NewBoard};
use crate::db::schema::boards;

pub fn insert(conn: &mut PgConnection, new_board: NewBoard<'_>) -> QueryResult<Board> {
    diesel::insert_into(boards::table)
        .values(new_board)
        .get_result(conn)
}

pub fn find(conn: &mut PgConnection, board_id: &str) -> QueryResult<Option<Board>> {
    boards::table
        .filter(boards::id.eq(board_id))
        .first(conn)
        .optional()
}

pub fn list_for_user(conn: &mut PgConnection, user_id: &str) -> QueryResult<Vec<Board>> {
    boards::table
        .filter(boards::user_id.eq(user_id))
        .order(boards::updated_at.desc())
        .load(conn)
}

pub fn delete(conn: &mut PgConnection, board_id: &str) -> QueryResult<usize> {
    diesel::delete(boards::table.filter(boards::id.eq(board_id))).execute(conn)
}
