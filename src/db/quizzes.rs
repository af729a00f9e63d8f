// src/db/quizzes.rs

use sqlx::PgConnection;

use super::{
    DbError,
    patch::{Patch, PatchTarget},
};
use crate::models::quiz::{CreateQuizRequest, PatchQuizRequest, Quiz, UpdateQuizRequest};

const PROJECTION: &str = "quiz_id, name, creation_method_id, creator_id, media_id";

const PATCH_TARGET: PatchTarget = PatchTarget {
    table: "quiz",
    key: "quiz_id",
    columns: &["name", "creation_method_id", "creator_id", "media_id"],
    returning: PROJECTION,
};

/// Lists quizzes newest first, optionally only those by one creator.
pub async fn list(conn: &mut PgConnection, creator_id: Option<i64>) -> Result<Vec<Quiz>, DbError> {
    let quizzes = sqlx::query_as::<_, Quiz>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM quiz
        WHERE ($1::BIGINT IS NULL OR creator_id = $1)
        ORDER BY quiz_id DESC
        "#
    ))
    .bind(creator_id)
    .fetch_all(conn)
    .await?;

    Ok(quizzes)
}

pub async fn get(conn: &mut PgConnection, quiz_id: i64) -> Result<Option<Quiz>, DbError> {
    let quiz = sqlx::query_as::<_, Quiz>(&format!(
        "SELECT {PROJECTION} FROM quiz WHERE quiz_id = $1"
    ))
    .bind(quiz_id)
    .fetch_optional(conn)
    .await?;

    Ok(quiz)
}

pub async fn create(conn: &mut PgConnection, req: &CreateQuizRequest) -> Result<Quiz, DbError> {
    let quiz = sqlx::query_as::<_, Quiz>(&format!(
        r#"
        INSERT INTO quiz (name, creation_method_id, creator_id, media_id)
        VALUES ($1, $2, $3, $4)
        RETURNING {PROJECTION}
        "#
    ))
    .bind(&req.name)
    .bind(req.creation_method_id)
    .bind(req.creator_id)
    .bind(req.media_id)
    .fetch_one(conn)
    .await?;

    Ok(quiz)
}

pub async fn update(
    conn: &mut PgConnection,
    quiz_id: i64,
    req: &UpdateQuizRequest,
) -> Result<Option<Quiz>, DbError> {
    let quiz = sqlx::query_as::<_, Quiz>(&format!(
        r#"
        UPDATE quiz
        SET name = $1, creation_method_id = $2, creator_id = $3, media_id = $4
        WHERE quiz_id = $5
        RETURNING {PROJECTION}
        "#
    ))
    .bind(&req.name)
    .bind(req.creation_method_id)
    .bind(req.creator_id)
    .bind(req.media_id)
    .bind(quiz_id)
    .fetch_optional(conn)
    .await?;

    Ok(quiz)
}

pub async fn patch(
    conn: &mut PgConnection,
    quiz_id: i64,
    req: PatchQuizRequest,
) -> Result<Option<Quiz>, DbError> {
    let mut builder = Patch::new(PATCH_TARGET)
        .set("name", req.name)
        .set("creation_method_id", req.creation_method_id)
        .set("creator_id", req.creator_id)
        .set("media_id", req.media_id)
        .into_query(quiz_id)?;

    let quiz = builder
        .build_query_as::<Quiz>()
        .fetch_optional(conn)
        .await?;

    Ok(quiz)
}

/// Deleting a quiz removes its questions, answers and sessions with it.
pub async fn delete(conn: &mut PgConnection, quiz_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM quiz WHERE quiz_id = $1")
        .bind(quiz_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
