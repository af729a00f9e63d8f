// src/db/participant_answers.rs

use sqlx::PgConnection;

use super::DbError;
use crate::models::participant::{ParticipantAnswer, SubmitAnswerRequest};

const PROJECTION: &str = "participant_answer_id, participant_id, question_id, chosen_answer_id, \
     is_correct, points_awarded, answered_at";

pub async fn create(
    conn: &mut PgConnection,
    req: &SubmitAnswerRequest,
) -> Result<ParticipantAnswer, DbError> {
    let answer = sqlx::query_as::<_, ParticipantAnswer>(&format!(
        r#"
        INSERT INTO participant_answer
        (participant_id, question_id, chosen_answer_id, is_correct, points_awarded, answered_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.participant_id)
    .bind(req.question_id)
    .bind(req.chosen_answer_id)
    .bind(req.is_correct)
    .bind(req.points_awarded)
    .fetch_one(conn)
    .await?;

    Ok(answer)
}

pub async fn list_for_participant(
    conn: &mut PgConnection,
    participant_id: i64,
) -> Result<Vec<ParticipantAnswer>, DbError> {
    let answers = sqlx::query_as::<_, ParticipantAnswer>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM participant_answer
        WHERE participant_id = $1
        ORDER BY answered_at ASC, participant_answer_id ASC
        "#
    ))
    .bind(participant_id)
    .fetch_all(conn)
    .await?;

    Ok(answers)
}
