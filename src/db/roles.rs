// src/db/roles.rs

//! Roles repository, including the user <-> role join table.

use sqlx::PgConnection;

use super::DbError;
use crate::models::role::{Role, RoleRequest};

pub async fn list(conn: &mut PgConnection) -> Result<Vec<Role>, DbError> {
    let roles = sqlx::query_as::<_, Role>(
        "SELECT role_id, name, description FROM role ORDER BY role_id DESC",
    )
    .fetch_all(conn)
    .await?;

    Ok(roles)
}

pub async fn get(conn: &mut PgConnection, role_id: i64) -> Result<Option<Role>, DbError> {
    let role = sqlx::query_as::<_, Role>(
        "SELECT role_id, name, description FROM role WHERE role_id = $1",
    )
    .bind(role_id)
    .fetch_optional(conn)
    .await?;

    Ok(role)
}

pub async fn create(conn: &mut PgConnection, req: &RoleRequest) -> Result<Role, DbError> {
    let role = sqlx::query_as::<_, Role>(
        r#"
        INSERT INTO role (name, description)
        VALUES ($1, $2)
        RETURNING role_id, name, description
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .fetch_one(conn)
    .await?;

    Ok(role)
}

pub async fn update(
    conn: &mut PgConnection,
    role_id: i64,
    req: &RoleRequest,
) -> Result<Option<Role>, DbError> {
    let role = sqlx::query_as::<_, Role>(
        r#"
        UPDATE role
        SET name = $1, description = $2
        WHERE role_id = $3
        RETURNING role_id, name, description
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(role_id)
    .fetch_optional(conn)
    .await?;

    Ok(role)
}

pub async fn delete(conn: &mut PgConnection, role_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM role WHERE role_id = $1")
        .bind(role_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Roles held by a user, by name.
pub async fn list_for_user(conn: &mut PgConnection, user_id: i64) -> Result<Vec<Role>, DbError> {
    let roles = sqlx::query_as::<_, Role>(
        r#"
        SELECT r.role_id, r.name, r.description
        FROM role r
        JOIN user_role ur ON ur.role_id = r.role_id
        WHERE ur.user_id = $1
        ORDER BY r.name
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(roles)
}

/// Grants a role to a user. Granting twice is a no-op.
pub async fn assign_to_user(
    conn: &mut PgConnection,
    user_id: i64,
    role_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO user_role (user_id, role_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn revoke_from_user(
    conn: &mut PgConnection,
    user_id: i64,
    role_id: i64,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM user_role WHERE user_id = $1 AND role_id = $2")
        .bind(user_id)
        .bind(role_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
