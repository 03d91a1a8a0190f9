use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::db::repos;
use crate::error::ApiError;
use crate::AppState;

/// The resolved identity of a request. Sessions are issued and stored by
/// the external identity system; this extractor only consumes them, and it
/// is the single place a credential becomes a user id. Every service
/// operation downstream takes the id as an explicit parameter.
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthenticated)?;

        let mut conn = state.pool.get()?;
        let user_id =
            repos::session::find_user_id(&mut conn, token)?.ok_or(ApiError::Unauthenticated)?;

        Ok(AuthUser { user_id })
    }
}
