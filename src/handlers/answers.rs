// src/handlers/answers.rs

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
    db::{self, answers},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::answer::{CreateAnswerRequest, UpdateAnswerRequest},
};

pub async fn create_answer(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let answer = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            answers::create(conn, &payload)
                .await
                .or_bad_request("Could not create answer. Verify question_id exists.")
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

pub async fn update_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UpdateAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let answer = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            answers::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update answer. Verify question_id exists.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    Ok(Json(answer))
}

pub async fn delete_answer(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(answers::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    Ok(Json(json!({ "message": "Answer deleted" })))
}
