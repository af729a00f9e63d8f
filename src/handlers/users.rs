// src/handlers/users.rs

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
    db::{self, roles, users},
    error::{AppError, DbResultExt},
    extractors::AppJson,
    models::user::{CreateUserRequest, ListUsersParams, PatchUserRequest, UpdateUserRequest},
};

/// Lists users, newest first. `?active=true|false` filters on the active flag.
pub async fn list_users(
    State(pool): State<PgPool>,
    Query(params): Query<ListUsersParams>,
) -> Result<impl IntoResponse, AppError> {
    let users = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(users::list(conn, params.active).await?) })
    })
    .await?;

    Ok(Json(users))
}

/// Retrieves a single user by ID.
pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(users::get(conn, id).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Signs up a new user.
///
/// Returns 201 Created and the user (without the password hash).
pub async fn create_user(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            users::create(conn, &payload)
                .await
                .or_bad_request("Could not create user. Username or email might already exist.")
        })
    })
    .await?;

    tracing::info!("User {} created", user.user_id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Replaces a user's mutable fields.
pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            users::update(conn, id, &payload)
                .await
                .or_bad_request("Could not update user. Username or email might already exist.")
        })
    })
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Partially updates a user: any of `is_active`, `is_verified`, `language`.
///
/// An empty body is rejected before a connection is taken.
pub async fn patch_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<PatchUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::BadRequest(
            "Supply at least one of is_active, is_verified, language".to_string(),
        ));
    }
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(users::patch(conn, id, payload).await?) })
    })
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Deletes a user by ID.
pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            users::delete(conn, id)
                .await
                .or_bad_request("Could not delete user. The user might still host a game session.")
        })
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted" })))
}

/// Lists the roles granted to a user.
pub async fn list_user_roles(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let roles = db::transaction(&pool, move |conn| {
        Box::pin(async move {
            if users::get(&mut *conn, id).await?.is_none() {
                return Err(AppError::NotFound("User not found".to_string()));
            }
            Ok(roles::list_for_user(conn, id).await?)
        })
    })
    .await?;

    Ok(Json(roles))
}

/// Grants a role to a user. Idempotent.
pub async fn assign_role(
    State(pool): State<PgPool>,
    Path((user_id, role_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    db::transaction(&pool, move |conn| {
        Box::pin(async move {
            roles::assign_to_user(conn, user_id, role_id)
                .await
                .or_bad_request("Could not assign role. Verify user_id and role_id exist.")
        })
    })
    .await?;

    Ok(Json(json!({ "message": "Role assigned" })))
}

/// Removes a role from a user.
pub async fn revoke_role(
    State(pool): State<PgPool>,
    Path((user_id, role_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let removed = db::transaction(&pool, move |conn| {
        Box::pin(async move { Ok(roles::revoke_from_user(conn, user_id, role_id).await?) })
    })
    .await?;

    if removed == 0 {
        return Err(AppError::NotFound("User does not have that role".to_string()));
    }

    Ok(Json(json!({ "message": "Role revoked" })))
}
