use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a request can fail with. Only the kind and a short message
/// cross the HTTP boundary; store errors are logged and replaced with a
/// generic body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session. Surfaces as 401 "Unauthorized".
    #[error("Unauthorized")]
    Unauthenticated,
    /// Valid session, but the entity belongs to another user. Also surfaces
    /// as 401 — the service has always used 401 here rather than 403, and
    /// clients depend on it.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    /// A bulk reorder is not one transaction; this names the columns whose
    /// order write failed. Reissuing the full reorder is always safe.
    #[error("Column order update failed for: {}", .failed.join(", "))]
    ReorderIncomplete { failed: Vec<String> },
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
    #[error(transparent)]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ReorderIncomplete { .. } | ApiError::Database(_) | ApiError::Pool(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Database(err) => {
                error!(error = %err, "database error");
                String::from("Internal server error")
            }
            ApiError::Pool(err) => {
                error!(error = %err, "connection pool error");
                String::from("Internal server error")
            }
            other => other.to_string(),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn unauthenticated_and_unauthorized_share_the_401_mapping() {
        assert_eq!(
            ApiError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::NotFound("Column");
        assert_eq!(err.to_string(), "Column not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation(String::from("Name is required"));
        assert_eq!(err.to_string(), "Name is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn partial_reorder_failure_lists_the_failed_columns() {
        let err = ApiError::ReorderIncomplete {
            failed: vec![String::from("c1"), String::from("c2")],
        };
        assert_eq!(err.to_string(), "Column order update failed for: c1, c2");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_do_not_leak_detail() {
        let err = ApiError::Database(diesel::result::Error::BrokenTransactionManager);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
