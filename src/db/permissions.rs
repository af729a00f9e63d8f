// src/db/permissions.rs

//! Permissions repository, including the role <-> permission join table.

use sqlx::PgConnection;

use super::DbError;
use crate::models::role::{Permission, PermissionRequest};

pub async fn list(conn: &mut PgConnection) -> Result<Vec<Permission>, DbError> {
    let permissions = sqlx::query_as::<_, Permission>(
        "SELECT permission_id, name, description FROM permission ORDER BY permission_id DESC",
    )
    .fetch_all(conn)
    .await?;

    Ok(permissions)
}

pub async fn get(
    conn: &mut PgConnection,
    permission_id: i64,
) -> Result<Option<Permission>, DbError> {
    let permission = sqlx::query_as::<_, Permission>(
        "SELECT permission_id, name, description FROM permission WHERE permission_id = $1",
    )
    .bind(permission_id)
    .fetch_optional(conn)
    .await?;

    Ok(permission)
}

pub async fn create(
    conn: &mut PgConnection,
    req: &PermissionRequest,
) -> Result<Permission, DbError> {
    let permission = sqlx::query_as::<_, Permission>(
        r#"
        INSERT INTO permission (name, description)
        VALUES ($1, $2)
        RETURNING permission_id, name, description
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .fetch_one(conn)
    .await?;

    Ok(permission)
}

pub async fn update(
    conn: &mut PgConnection,
    permission_id: i64,
    req: &PermissionRequest,
) -> Result<Option<Permission>, DbError> {
    let permission = sqlx::query_as::<_, Permission>(
        r#"
        UPDATE permission
        SET name = $1, description = $2
        WHERE permission_id = $3
        RETURNING permission_id, name, description
        "#,
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(permission_id)
    .fetch_optional(conn)
    .await?;

    Ok(permission)
}

pub async fn delete(conn: &mut PgConnection, permission_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM permission WHERE permission_id = $1")
        .bind(permission_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_for_role(
    conn: &mut PgConnection,
    role_id: i64,
) -> Result<Vec<Permission>, DbError> {
    let permissions = sqlx::query_as::<_, Permission>(
        r#"
        SELECT p.permission_id, p.name, p.description
        FROM permission p
        JOIN role_permission rp ON rp.permission_id = p.permission_id
        WHERE rp.role_id = $1
        ORDER BY p.name
        "#,
    )
    .bind(role_id)
    .fetch_all(conn)
    .await?;

    Ok(permissions)
}

/// Grants a permission to a role. Granting twice is a no-op.
pub async fn grant_to_role(
    conn: &mut PgConnection,
    role_id: i64,
    permission_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO role_permission (role_id, permission_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(role_id)
    .bind(permission_id)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn revoke_from_role(
    conn: &mut PgConnection,
    role_id: i64,
    permission_id: i64,
) -> Result<u64, DbError> {
    let result =
        sqlx::query("DELETE FROM role_permission WHERE role_id = $1 AND permission_id = $2")
            .bind(role_id)
            .bind(permission_id)
            .execute(conn)
            .await?;

    Ok(result.rows_affected())
}
