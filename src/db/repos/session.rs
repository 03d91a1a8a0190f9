use chrono::Utc;
use diesel::prelude::*;

use crate::db::schema::{sessions, users};

/// Resolves a bearer token to the id of the user it belongs to. Expired
/// sessions and tokens pointing at deleted users both come back as `None`.
pub fn find_user_id(conn: &mut PgConnection, token: &str) -> QueryResult<Option<String>> {
    sessions::table
        .inner_join(users::table)
        .filter(sessions::token.eq(token))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(users::id)
        .first::<String>(conn)
        .optional()
}
