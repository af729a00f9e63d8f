// src/db/participants.rs

use sqlx::PgConnection;

use super::DbError;
use crate::models::participant::{JoinSessionRequest, Participant};

const PROJECTION: &str = "participant_id, session_id, user_id, nickname, joined_at, score";

/// Adds a participant with score 0 to a session that has not ended.
///
/// Returns `None` when the session does not exist or is already over. A guest
/// joins with `user_id = None`; nicknames may repeat.
pub async fn join(
    conn: &mut PgConnection,
    req: &JoinSessionRequest,
) -> Result<Option<Participant>, DbError> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        r#"
        INSERT INTO session_participant (session_id, user_id, nickname, joined_at, score)
        SELECT gs.session_id, $2, $3, NOW(), 0
        FROM game_session gs
        WHERE gs.session_id = $1 AND gs.ended_at IS NULL
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.session_id)
    .bind(req.user_id)
    .bind(&req.nickname)
    .fetch_optional(conn)
    .await?;

    Ok(participant)
}

/// Participants of a session, highest score first, earliest joiner breaking ties.
pub async fn list_for_session(
    conn: &mut PgConnection,
    session_id: i64,
) -> Result<Vec<Participant>, DbError> {
    let participants = sqlx::query_as::<_, Participant>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM session_participant
        WHERE session_id = $1
        ORDER BY score DESC, joined_at ASC, participant_id ASC
        "#
    ))
    .bind(session_id)
    .fetch_all(conn)
    .await?;

    Ok(participants)
}

/// Overwrites the score (last write wins).
pub async fn update_score(
    conn: &mut PgConnection,
    participant_id: i64,
    score: i32,
) -> Result<Option<Participant>, DbError> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        r#"
        UPDATE session_participant
        SET score = $1
        WHERE participant_id = $2
        RETURNING {PROJECTION}
        "#
    ))
    .bind(score)
    .bind(participant_id)
    .fetch_optional(conn)
    .await?;

    Ok(participant)
}

pub async fn delete(conn: &mut PgConnection, participant_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM session_participant WHERE participant_id = $1")
        .bind(participant_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
