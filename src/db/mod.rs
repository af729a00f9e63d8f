// src/db/mod.rs

//! Data-access layer.
//!
//! Repositories are free functions over `&mut PgConnection` so that every call a
//! handler makes runs inside the one transaction opened by [`transaction`].
//! They never map absence to an error: lookups return `Option`, deletes return
//! the affected-row count, and the handler decides what "missing" means.

pub mod answers;
pub mod participant_answers;
pub mod participants;
pub mod patch;
pub mod permissions;
pub mod questions;
pub mod quizzes;
pub mod roles;
pub mod sessions;
pub mod users;

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::{
    PgConnection, PgPool,
    error::ErrorKind,
    postgres::PgPoolOptions,
};
use thiserror::Error;

use crate::{config::Config, error::AppError};

const CONNECT_RETRIES: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Which storage rule rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{kind:?} constraint violated ({})", .constraint.as_deref().unwrap_or("unnamed"))]
    Constraint {
        kind: ConstraintKind,
        constraint: Option<String>,
    },

    #[error("patch contains no fields")]
    EmptyPatch,

    #[error("column '{0}' is not patchable")]
    DisallowedColumn(&'static str),

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let classified = err.as_database_error().and_then(|db_err| {
            let kind = match db_err.kind() {
                ErrorKind::UniqueViolation => ConstraintKind::Unique,
                ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                ErrorKind::CheckViolation => ConstraintKind::Check,
                _ => return None,
            };
            Some(DbError::Constraint {
                kind,
                constraint: db_err.constraint().map(str::to_string),
            })
        });

        classified.unwrap_or(DbError::Sqlx(err))
    }
}

/// Opens the connection pool, retrying while the database is still starting up.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                attempt += 1;
                if attempt > CONNECT_RETRIES {
                    return Err(e);
                }
                tracing::warn!(
                    "Database not ready, retrying in {}s... (Attempt {})",
                    CONNECT_RETRY_DELAY.as_secs(),
                    attempt
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
            }
        }
    }
}

/// Runs `work` inside a single transaction on a connection taken from `pool`.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is rolled back and
/// the original error is returned unchanged. The connection goes back to the pool
/// when the transaction guard drops, on every exit path; if the future is
/// cancelled mid-flight sqlx rolls back on drop as well.
pub async fn transaction<T, F>(pool: &PgPool, work: F) -> Result<T, AppError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
{
    let mut tx = pool.begin().await.map_err(DbError::from)?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(DbError::from)?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!("Rolling back request transaction: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {:?}", rollback_err);
            }
            Err(err)
        }
    }
}
