// src/handlers/sessions.rs

//! Game session lifecycle: start, join, answer, advance, end.
//!
//! Only data mutation lives here; timing and broadcasting belong to whatever
//! drives the game.

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
    db::{self, participant_answers, participants, sessions},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::{
        participant::{JoinSessionRequest, SubmitAnswerRequest},
        session::{CreateSessionRequest, ListSessionsParams},
    },
};

/// Lists sessions, optionally filtered by `?quiz_id=`.
pub async fn list_sessions(
    State(pool): State<PgPool>,
    Query(params): Query<ListSessionsParams>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(sessions::list(conn, params.quiz_id).await?) })
    })
    .await?;

    Ok(Json(sessions))
}

/// Looks a session up by its access code.
pub async fn get_session_by_code(
    State(pool): State<PgPool>,
    Path(access_code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(sessions::get_by_code(conn, &access_code).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

/// Starts a session at question index 0.
pub async fn start_session(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let session = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            sessions::create(conn, &payload)
                .await
                .or_bad_request("Could not start session. Verify quiz_id and host_id.")
        })
    })
    .await?;

    tracing::info!(
        "Session {} started for quiz {} with code {}",
        session.session_id,
        session.quiz_id,
        session.access_code
    );

    Ok((StatusCode::CREATED, Json(session)))
}

/// Adds a participant (registered or guest) with score 0.
pub async fn join_session(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<JoinSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    const REJECTED: &str = "Could not join session. Session might be closed or user invalid.";

    let participant = db::transaction(&pool, move |conn| {
        Box::pin(async move { participants::join(conn, &payload).await.or_bad_request(REJECTED) })
    })
    .await?
    .ok_or(AppError::BadRequest(REJECTED.to_string()))?;

    Ok(Json(participant))
}

/// Records one answer from a participant.
pub async fn submit_answer(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let answer = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            participant_answers::create(conn, &payload)
                .await
                .or_bad_request("Could not submit answer. Verify IDs.")
        })
    })
    .await?;

    Ok(Json(answer))
}

/// Moves the session on to its next question.
pub async fn next_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(sessions::advance_question(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

pub async fn end_session(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let session = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(sessions::end(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

/// Leaderboard for a session.
pub async fn list_session_participants(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let participants = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(participants::list_for_session(conn, id).await?) })
    })
    .await?;

    Ok(Json(participants))
}

pub async fn delete_session(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(sessions::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    Ok(Json(json!({ "message": "Session deleted" })))
}
