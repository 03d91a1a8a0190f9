//! Ownership checks over the entity chain Task -> Column -> Board -> User.
//! Every mutating or single-entity-read operation runs one of these before
//! touching state. Read-only; the resolved chain is handed back so callers
//! do not refetch it.

use diesel::PgConnection;

use crate::db::models::{Board, Column, Task};
use crate::db::repos;
use crate::error::ApiError;

/// An absent entity is `NotFound`; one that exists under another user is
/// `Unauthorized`. Both render as the same unauthorized signal where the
/// interface demands it, but internally the distinction is kept.
fn verdict(owner_id: &str, actor_id: &str) -> Result<(), ApiError> {
    if owner_id == actor_id {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

pub fn board(conn: &mut PgConnection, actor_id: &str, board_id: &str) -> Result<Board, ApiError> {
    let board = repos::board::find(conn, board_id)?.ok_or(ApiError::NotFound("Board"))?;
    verdict(&board.user_id, actor_id)?;
    Ok(board)
}

pub fn column(
    conn: &mut PgConnection,
    actor_id: &str,
    column_id: &str,
) -> Result<(Column, Board), ApiError> {
    let (column, board) =
        repos::column::find_with_board(conn, column_id)?.ok_or(ApiError::NotFound("Column"))?;
    verdict(&board.user_id, actor_id)?;
    Ok((column, board))
}

pub fn task(
    conn: &mut PgConnection,
    actor_id: &str,
    task_id: &str,
) -> Result<(Task, Column), ApiError> {
    let (task, column, board) =
        repos::task::find_with_chain(conn, task_id)?.ok_or(ApiError::NotFound("Task"))?;
    verdict(&board.user_id, actor_id)?;
    Ok((task, column))
}

#[cfg(test)]
mod tests {
    use super::verdict;
    use crate::error::ApiError;

    #[test]
    fn owner_is_allowed() {
        assert!(verdict("user-1", "user-1").is_ok());
    }

    #[test]
    fn any_other_actor_is_denied() {
        let denied = verdict("user-1", "user-2").unwrap_err();
        assert!(matches!(denied, ApiError::Unauthorized));
    }
}
