// src/handlers/participants.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    db::{self, participant_answers, participants},
    error::AppError,
    extractors::AppJson,
    models::participant::ScoreUpdateRequest,
};

/// Overwrites a participant's score with the given value.
pub async fn update_score(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ScoreUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let participant = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(participants::update_score(conn, id, payload.score).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Participant not found".to_string()))?;

    Ok(Json(participant))
}

/// Everything a participant has answered so far, oldest first.
pub async fn list_participant_answers(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(participant_answers::list_for_participant(conn, id).await?) })
    })
    .await?;

    Ok(Json(answers))
}

pub async fn delete_participant(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(participants::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Participant not found".to_string()));
    }

    Ok(Json(json!({ "message": "Participant deleted" })))
}
