// src/db/users.rs

//! Users repository.

use sqlx::PgConnection;

use super::{
    DbError,
    patch::{Patch, PatchTarget},
};
use crate::models::user::{CreateUserRequest, PatchUserRequest, UpdateUserRequest, User};

const PROJECTION: &str = "user_id, username, email, language, is_verified, is_active, created_at, current_subscription_id";

const PATCH_TARGET: PatchTarget = PatchTarget {
    table: "users",
    key: "user_id",
    columns: &["is_active", "is_verified", "language"],
    returning: PROJECTION,
};

/// Lists users newest first, optionally only active or inactive ones.
pub async fn list(conn: &mut PgConnection, is_active: Option<bool>) -> Result<Vec<User>, DbError> {
    let users = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {PROJECTION}
        FROM users
        WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
        ORDER BY user_id DESC
        "#
    ))
    .bind(is_active)
    .fetch_all(conn)
    .await?;

    Ok(users)
}

pub async fn get(conn: &mut PgConnection, user_id: i64) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {PROJECTION} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

pub async fn create(conn: &mut PgConnection, req: &CreateUserRequest) -> Result<User, DbError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, email, password_hash, language)
        VALUES ($1, $2, $3, $4)
        RETURNING {PROJECTION}
        "#
    ))
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.password_hash)
    .bind(&req.language)
    .fetch_one(conn)
    .await?;

    Ok(user)
}

/// Replaces every mutable column. Returns `None` if no such user exists.
pub async fn update(
    conn: &mut PgConnection,
    user_id: i64,
    req: &UpdateUserRequest,
) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = $1,
            email = $2,
            password_hash = $3,
            language = $4,
            is_verified = $5,
            is_active = $6,
            current_subscription_id = $7
        WHERE user_id = $8
        RETURNING {PROJECTION}
        "#
    ))
    .bind(&req.username)
    .bind(&req.email)
    .bind(&req.password_hash)
    .bind(&req.language)
    .bind(req.is_verified)
    .bind(req.is_active)
    .bind(req.current_subscription_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Updates only the supplied fields. Fails with [`DbError::EmptyPatch`] before
/// touching storage if nothing was supplied.
pub async fn patch(
    conn: &mut PgConnection,
    user_id: i64,
    req: PatchUserRequest,
) -> Result<Option<User>, DbError> {
    let mut builder = Patch::new(PATCH_TARGET)
        .set("is_active", req.is_active)
        .set("is_verified", req.is_verified)
        .set("language", req.language)
        .into_query(user_id)?;

    let user = builder
        .build_query_as::<User>()
        .fetch_optional(conn)
        .await?;

    Ok(user)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete(conn: &mut PgConnection, user_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
