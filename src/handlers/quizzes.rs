// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    db::{self, questions, quizzes},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::quiz::{CreateQuizRequest, ListQuizzesParams, PatchQuizRequest, UpdateQuizRequest},
};

/// Lists quizzes, optionally filtered by `?creator_id=`.
pub async fn list_quizzes(
    State(pool): State<PgPool>,
    Query(params): Query<ListQuizzesParams>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(quizzes::list(conn, params.creator_id).await?) })
    })
    .await?;

    Ok(Json(quizzes))
}

pub async fn get_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(quizzes::get(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Lists a quiz's questions in display order.
///
/// An unknown quiz yields an empty list rather than 404.
pub async fn list_quiz_questions(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(questions::list_for_quiz(conn, id).await?) })
    })
    .await?;

    Ok(Json(questions))
}

pub async fn create_quiz(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            quizzes::create(conn, &payload)
                .await
                .or_bad_request("Could not create quiz. Verify creator_id exists.")
        })
    })
    .await?;

    tracing::info!("Quiz {} created", quiz.quiz_id);

    Ok((StatusCode::CREATED, Json(quiz)))
}

pub async fn update_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            quizzes::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update quiz. Verify creator_id exists.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

pub async fn patch_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<PatchQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest(
            "Supply at least one of name, creation_method_id, creator_id, media_id".to_string(),
        ));
    }
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            quizzes::patch(conn, id, payload)
                .await
                .or_bad_request("Could not update quiz. Verify creator_id exists.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Deletes a quiz together with its questions, answers and sessions.
pub async fn delete_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(quizzes::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(json!({ "message": "Quiz deleted" })))
}
