// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::db::DbError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
/// Storage details only ever reach the log, never the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Constraint violations and empty patches are the client's fault; everything
/// else coming out of the data layer is ours.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Constraint { .. } => {
                AppError::BadRequest("Request violates a database constraint".to_string())
            }
            DbError::EmptyPatch => {
                AppError::BadRequest("At least one field must be supplied".to_string())
            }
            DbError::DisallowedColumn(_) | DbError::Sqlx(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Lets a handler name the constraint a write most likely tripped over.
pub trait DbResultExt<T> {
    /// Maps a constraint violation to `BadRequest(reason)`; other errors convert as usual.
    fn or_bad_request(self, reason: &str) -> Result<T, AppError>;
}

impl<T> DbResultExt<T> for Result<T, DbError> {
    fn or_bad_request(self, reason: &str) -> Result<T, AppError> {
        self.map_err(|err| match err {
            DbError::Constraint { kind, constraint } => {
                tracing::debug!("Constraint {:?} ({:?}) rejected write", kind, constraint);
                AppError::BadRequest(reason.to_string())
            }
            other => AppError::from(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConstraintKind;

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::InternalServerError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn constraint_violation_becomes_bad_request_with_reason() {
        let result: Result<(), DbError> = Err(DbError::Constraint {
            kind: ConstraintKind::Unique,
            constraint: Some("users_email_key".to_string()),
        });

        match result.or_bad_request("Username or email might already exist.") {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "Username or email might already exist.")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn storage_failure_stays_internal() {
        let result: Result<(), DbError> = Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));

        assert!(matches!(
            result.or_bad_request("irrelevant"),
            Err(AppError::InternalServerError(_))
        ));
    }

    #[test]
    fn empty_patch_is_bad_request() {
        assert!(matches!(
            AppError::from(DbError::EmptyPatch),
            AppError::BadRequest(_)
        ));
    }
}
