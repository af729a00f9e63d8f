// src/handlers/permissions.rs

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
    db::{self, permissions},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::role::PermissionRequest,
};

pub async fn list_permissions(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let permissions = db::transaction(&pool, |conn| {
        Box::pin(async move { Ok(permissions::list(conn).await?) })
    })
    .await?;

    Ok(Json(permissions))
}

pub async fn get_permission(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let permission = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(permissions::get(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Permission not found".to_string()))?;

    Ok(Json(permission))
}

pub async fn create_permission(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<PermissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let permission = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            permissions::create(conn, &payload)
                .await
                .or_bad_request("Could not create permission. Permission name might already exist.")
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(permission)))
}

pub async fn update_permission(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<PermissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let permission = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            permissions::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update permission. Permission name might already exist.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Permission not found".to_string()))?;

    Ok(Json(permission))
}

pub async fn delete_permission(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(permissions::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Permission not found".to_string()));
    }

    Ok(Json(json!({ "message": "Permission deleted" })))
}
