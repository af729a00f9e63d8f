// src/db/questions.rs

use sqlx::PgConnection;

use super::{
    DbError,
    patch::{Patch, PatchTarget},
};
use crate::models::question::{
    CreateQuestionRequest, PatchQuestionRequest, Question, UpdateQuestionRequest,
};

const PROJECTION: &str =
    "question_id, quiz_id, question_text, question_type, time_limit, points, sort_order, media_id";

const PATCH_TARGET: PatchTarget = PatchTarget {
    table: "quiz_question",
    key: "question_id",
    columns: &[
        "question_text",
        "question_type",
        "time_limit",
        "points",
        "sort_order",
        "media_id",
    ],
    returning: PROJECTION,
};

/// Questions of a quiz in display order: `sort_order` (NULL last), then id.
pub async fn list_for_quiz(conn: &mut PgConnection, quiz_id: i64) -> Result<Vec<Question>, DbError> {
    let questions = sqlx::query_as::<_, Question>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM quiz_question
        WHERE quiz_id = $1
        ORDER BY sort_order ASC NULLS LAST, question_id ASC
        "#
    ))
    .bind(quiz_id)
    .fetch_all(conn)
    .await?;

    Ok(questions)
}

pub async fn get(conn: &mut PgConnection, question_id: i64) -> Result<Option<Question>, DbError> {
    let question = sqlx::query_as::<_, Question>(&format!(
        "SELECT {PROJECTION} FROM quiz_question WHERE question_id = $1"
    ))
    .bind(question_id)
    .fetch_optional(conn)
    .await?;

    Ok(question)
}

pub async fn create(
    conn: &mut PgConnection,
    req: &CreateQuestionRequest,
) -> Result<Question, DbError> {
    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        INSERT INTO quiz_question
        (quiz_id, question_text, question_type, time_limit, points, sort_order, media_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.quiz_id)
    .bind(&req.question_text)
    .bind(&req.question_type)
    .bind(req.time_limit)
    .bind(req.points)
    .bind(req.sort_order)
    .bind(req.media_id)
    .fetch_one(conn)
    .await?;

    Ok(question)
}

pub async fn update(
    conn: &mut PgConnection,
    question_id: i64,
    req: &UpdateQuestionRequest,
) -> Result<Option<Question>, DbError> {
    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        UPDATE quiz_question
        SET quiz_id = $1,
            question_text = $2,
            question_type = $3,
            time_limit = $4,
            points = $5,
            sort_order = $6,
            media_id = $7
        WHERE question_id = $8
        RETURNING {PROJECTION}
        "#
    ))
    .bind(req.quiz_id)
    .bind(&req.question_text)
    .bind(&req.question_type)
    .bind(req.time_limit)
    .bind(req.points)
    .bind(req.sort_order)
    .bind(req.media_id)
    .bind(question_id)
    .fetch_optional(conn)
    .await?;

    Ok(question)
}

pub async fn patch(
    conn: &mut PgConnection,
    question_id: i64,
    req: PatchQuestionRequest,
) -> Result<Option<Question>, DbError> {
    let mut builder = Patch::new(PATCH_TARGET)
        .set("question_text", req.question_text)
        .set("question_type", req.question_type)
        .set("time_limit", req.time_limit)
        .set("points", req.points)
        .set("sort_order", req.sort_order)
        .set("media_id", req.media_id)
        .into_query(question_id)?;

    let question = builder
        .build_query_as::<Question>()
        .fetch_optional(conn)
        .await?;

    Ok(question)
}

pub async fn delete(conn: &mut PgConnection, question_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM quiz_question WHERE question_id = $1")
        .bind(question_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
