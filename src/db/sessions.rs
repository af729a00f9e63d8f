// src/db/sessions.rs

//! Game session repository.
//!
//! `current_question_index` is nullable in storage; the projection folds NULL to 0
//! so callers always see a number.

use sqlx::PgConnection;

use super::DbError;
use crate::models::session::{CreateSessionRequest, GameSession};

const PROJECTION: &str = "session_id, quiz_id, host_id, access_code, started_at, ended_at, \
     COALESCE(current_question_index, 0) AS current_question_index";

pub async fn list(conn: &mut PgConnection, quiz_id: Option<i64>) -> Result<Vec<GameSession>, DbError> {
    let sessions = sqlx::query_as::<_, GameSession>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM game_session
        WHERE ($1::BIGINT IS NULL OR quiz_id = $1)
        ORDER BY session_id DESC
        "#
    ))
    .bind(quiz_id)
    .fetch_all(conn)
    .await?;

    Ok(sessions)
}

/// Finds the most recently started session using `access_code`.
///
/// Codes are not unique across time, so an old, ended session may share the code
/// with the live one.
pub async fn get_by_code(
    conn: &mut PgConnection,
    access_code: &str,
) -> Result<Option<GameSession>, DbError> {
    let session = sqlx::query_as::<_, GameSession>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM game_session
        WHERE access_code = $1
        ORDER BY started_at DESC, session_id DESC
        LIMIT 1
        "#
    ))
    .bind(access_code)
    .fetch_optional(conn)
    .await?;

    Ok(session)
}

/// Starts a session at question index 0.
pub async fn create(
    conn: &mut PgConnection,
    req: &CreateSessionRequest,
) -> Result<GameSession, DbError> {
    let session = sqlx::query_as::<_, GameSession>(&format!(
        r#"
        INSERT INTO game_session (quiz_id, host_id, access_code, started_at, current_question_index)
        VALUES ($1, $2, $3, NOW(), 0)
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.quiz_id)
    .bind(req.host_id)
    .bind(&req.access_code)
    .fetch_one(conn)
    .await?;

    Ok(session)
}

/// Moves the session to its next question in one statement, so concurrent
/// advances each count exactly once.
pub async fn advance_question(
    conn: &mut PgConnection,
    session_id: i64,
) -> Result<Option<GameSession>, DbError> {
    let session = sqlx::query_as::<_, GameSession>(&format!(
        r#"
        UPDATE game_session
        SET current_question_index = COALESCE(current_question_index, 0) + 1
        WHERE session_id = $1
        RETURNING {PROJECTION}
        "#
    ))
    .bind(session_id)
    .fetch_optional(conn)
    .await?;

    Ok(session)
}

/// Marks the session as ended. Ending twice keeps the first timestamp.
pub async fn end(conn: &mut PgConnection, session_id: i64) -> Result<Option<GameSession>, DbError> {
    let session = sqlx::query_as::<_, GameSession>(&format!(
        r#"
        UPDATE game_session
        SET ended_at = COALESCE(ended_at, NOW())
        WHERE session_id = $1
        RETURNING {PROJECTION}
        "#
    ))
    .bind(session_id)
    .fetch_optional(conn)
    .await?;

    Ok(session)
}

pub async fn delete(conn: &mut PgConnection, session_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM game_session WHERE session_id = $1")
        .bind(session_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
