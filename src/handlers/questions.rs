// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    db::{self, answers, questions},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::question::{CreateQuestionRequest, PatchQuestionRequest, UpdateQuestionRequest},
};

pub async fn get_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(questions::get(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Lists a question's answer options in display order.
pub async fn list_question_answers(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(answers::list_for_question(conn, id).await?) })
    })
    .await?;

    Ok(Json(answers))
}

pub async fn create_question(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            questions::create(conn, &payload)
                .await
                .or_bad_request("Could not create question. Verify quiz_id exists.")
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn update_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            questions::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update question. Verify quiz_id exists.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

pub async fn patch_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<PatchQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest(
            "Supply at least one field to update".to_string(),
        ));
    }
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(questions::patch(conn, id, payload).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

pub async fn delete_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(questions::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(json!({ "message": "Question deleted" })))
}
