// src/db/answers.rs

use sqlx::PgConnection;

use super::DbError;
use crate::models::answer::{Answer, CreateAnswerRequest, UpdateAnswerRequest};

const PROJECTION: &str = "answer_id, question_id, answer_text, is_correct, sort_order, media_id";

/// Answer options of a question in display order: `sort_order` (NULL last), then id.
pub async fn list_for_question(
    conn: &mut PgConnection,
    question_id: i64,
) -> Result<Vec<Answer>, DbError> {
    let answers = sqlx::query_as::<_, Answer>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM quiz_answer
        WHERE question_id = $1
        ORDER BY sort_order ASC NULLS LAST, answer_id ASC
        "#
    ))
    .bind(question_id)
    .fetch_all(conn)
    .await?;

    Ok(answers)
}

pub async fn create(conn: &mut PgConnection, req: &CreateAnswerRequest) -> Result<Answer, DbError> {
    let answer = sqlx::query_as::<_, Answer>(&format!(
        r#"
        INSERT INTO quiz_answer (question_id, answer_text, is_correct, sort_order, media_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.question_id)
    .bind(&req.answer_text)
    .bind(req.is_correct)
    .bind(req.sort_order)
    .bind(req.media_id)
    .fetch_one(conn)
    .await?;

    Ok(answer)
}

pub async fn update(
    conn: &mut PgConnection,
    answer_id: i64,
    req: &UpdateAnswerRequest,
) -> Result<Option<Answer>, DbError> {
    let answer = sqlx::query_as::<_, Answer>(&format!(
        r#"
        UPDATE quiz_answer
        SET question_id = $1, answer_text = $2, is_correct = $3, sort_order = $4, media_id = $5
        WHERE answer_id = $6
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.question_id)
    .bind(&req.answer_text)
    .bind(req.is_correct)
    .bind(req.sort_order)
    .bind(req.media_id)
    .bind(answer_id)
    .fetch_optional(conn)
    .await?;

    Ok(answer)
}

pub async fn delete(conn: &mut PgConnection, answer_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM quiz_answer WHERE answer_id = $1")
        .bind(answer_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
