// src/models/role.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'role' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub role_id: i64,

    /// Unique role name (e.g., "admin", "host").
    pub name: String,

    pub description: Option<String>,
}

/// Represents the 'permission' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Permission {
    pub permission_id: i64,

    /// Unique permission name (e.g., "quiz:edit").
    pub name: String,

    pub description: Option<String>,
}

/// DTO for creating or replacing a role.
#[derive(Debug, Deserialize, Validate)]
pub struct RoleRequest {
    #[validate(length(min = 1, max = 100, message = "Role name must be between 1 and 100 characters."))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// DTO for creating or replacing a permission.
#[derive(Debug, Deserialize, Validate)]
pub struct PermissionRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Permission name must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
