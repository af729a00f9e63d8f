// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'game_session' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: i64,
    pub quiz_id: i64,
    pub host_id: i64,

    /// Short code players type in to find the session.
    pub access_code: String,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,

    /// Zero-based position in the quiz. Only moves forward.
    pub current_question_index: i32,
}

/// DTO for starting a session.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    pub quiz_id: i64,
    pub host_id: i64,
    #[validate(
        length(min = 1, max = 20, message = "Access code must be between 1 and 20 characters."),
        custom(function = validate_access_code)
    )]
    pub access_code: String,
}

/// Path segments under `/sessions/` that are routes of their own.
pub const RESERVED_ACCESS_CODES: &[&str] = &["join", "submit-answer"];

/// Access codes travel as a single path segment, so they are limited to ASCII
/// letters, digits, `-` and `_`, and may not shadow a fixed session route.
fn validate_access_code(code: &str) -> Result<(), validator::ValidationError> {
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(validator::ValidationError::new("invalid_access_code_charset")
            .with_message("Access code may only contain letters, digits, '-' and '_'.".into()));
    }
    if RESERVED_ACCESS_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(validator::ValidationError::new("reserved_access_code")
            .with_message("Access code is reserved.".into()));
    }
    Ok(())
}

/// Query parameters for listing sessions.
#[derive(Debug, Deserialize)]
pub struct ListSessionsParams {
    pub quiz_id: Option<i64>,
}
