// src/handlers/roles.rs

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
    db::{self, permissions, roles},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::role::RoleRequest,
};

/// Lists all roles.
pub async fn list_roles(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let roles = db::transaction(&pool, |conn| {
        Box::pin(async move { Ok(roles::list(conn).await?) })
    })
    .await?;

    Ok(Json(roles))
}

pub async fn get_role(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let role = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(roles::get(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("Role not found".to_string()))?;

    Ok(Json(role))
}

pub async fn create_role(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<RoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let role = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            roles::create(conn, &payload)
                .await
                .or_bad_request("Could not create role. Role name might already exist.")
        })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn update_role(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<RoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let role = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            roles::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update role. Role name might already exist.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("Role not found".to_string()))?;

    Ok(Json(role))
}

pub async fn delete_role(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(roles::delete(conn, id).await?) })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Role not found".to_string()));
    }

    Ok(Json(json!({ "message": "Role deleted" })))
}

/// Lists the permissions granted to a role.
pub async fn list_role_permissions(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            if roles::get(&mut *conn, id).await?.is_none() {
                return Err(AppError::NotFound("Role not found".to_string()));
            }
            Ok(permissions::list_for_role(conn, id).await?)
        })
    })
    .await?;

    Ok(Json(permissions))
}

/// Grants a permission to a role. Idempotent.
pub async fn grant_permission(
    State(pool): State<PgPool>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    db::transaction(&pool, move |conn| {
        Box::pin(async move {
            permissions::grant_to_role(conn, role_id, permission_id)
                .await
                .or_bad_request("Could not grant permission. Verify role_id and permission_id exist.")
        })
    })
    .await?;

    Ok(Json(json!({ "message": "Permission granted" })))
}

pub async fn revoke_permission(
    State(pool): State<PgPool>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let removed = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            Ok(permissions::revoke_from_role(conn, role_id, permission_id).await?)
        })
    })
    .await?;

    if removed == 0 {
        return Err(AppError::NotFound(
            "Role does not have that permission".to_string(),
        ));
    }

    Ok(Json(json!({ "message": "Permission revoked" })))
}
