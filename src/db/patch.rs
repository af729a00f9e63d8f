// src/db/patch.rs

//! Partial-update ("PATCH") statement construction.
//!
//! A [`Patch`] collects `(column, value)` assignments only for the fields a client
//! actually supplied. Column names come from a fixed allow-list per table and are
//! the only text ever spliced into SQL; every value is a bound parameter.

use sqlx::{Postgres, QueryBuilder};

use super::DbError;

/// A value assigned by a patch. Mirrors the column types the schema uses.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Text(String),
}

impl From<bool> for PatchValue {
    fn from(v: bool) -> Self {
        PatchValue::Bool(v)
    }
}

impl From<i32> for PatchValue {
    fn from(v: i32) -> Self {
        PatchValue::Int(v)
    }
}

impl From<i64> for PatchValue {
    fn from(v: i64) -> Self {
        PatchValue::BigInt(v)
    }
}

impl From<String> for PatchValue {
    fn from(v: String) -> Self {
        PatchValue::Text(v)
    }
}

/// Table metadata a patch is rendered against.
#[derive(Debug, Clone, Copy)]
pub struct PatchTarget {
    pub table: &'static str,
    pub key: &'static str,
    pub columns: &'static [&'static str],
    /// Projection for the `RETURNING` clause.
    pub returning: &'static str,
}

#[derive(Debug, Clone)]
pub struct Patch {
    target: PatchTarget,
    assignments: Vec<(&'static str, PatchValue)>,
}

impl Patch {
    pub fn new(target: PatchTarget) -> Self {
        Self {
            target,
            assignments: Vec::new(),
        }
    }

    /// Records an assignment if `value` is present; `None` leaves the column untouched.
    pub fn set<V>(mut self, column: &'static str, value: Option<V>) -> Self
    where
        V: Into<PatchValue>,
    {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The ordered assignments collected so far.
    pub fn assignments(&self) -> &[(&'static str, PatchValue)] {
        &self.assignments
    }

    /// Renders `UPDATE <table> SET ... WHERE <key> = $n RETURNING <projection>`.
    ///
    /// Fails with [`DbError::EmptyPatch`] when nothing was supplied and with
    /// [`DbError::DisallowedColumn`] for a column outside the allow-list, in both
    /// cases before any statement reaches the database.
    pub fn into_query(self, id: i64) -> Result<QueryBuilder<'static, Postgres>, DbError> {
        if self.assignments.is_empty() {
            return Err(DbError::EmptyPatch);
        }

        if let Some((column, _)) = self
            .assignments
            .iter()
            .find(|(column, _)| !self.target.columns.contains(column))
        {
            return Err(DbError::DisallowedColumn(*column));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE ");
        builder.push(self.target.table);
        builder.push(" SET ");

        let mut separated = builder.separated(", ");
        for (column, value) in self.assignments {
            separated.push(column);
            separated.push_unseparated(" = ");
            match value {
                PatchValue::Bool(v) => separated.push_bind_unseparated(v),
                PatchValue::Int(v) => separated.push_bind_unseparated(v),
                PatchValue::BigInt(v) => separated.push_bind_unseparated(v),
                PatchValue::Text(v) => separated.push_bind_unseparated(v),
            };
        }

        builder.push(" WHERE ");
        builder.push(self.target.key);
        builder.push(" = ");
        builder.push_bind(id);
        builder.push(" RETURNING ");
        builder.push(self.target.returning);

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: PatchTarget = PatchTarget {
        table: "users",
        key: "user_id",
        columns: &["is_active", "is_verified", "language"],
        returning: "user_id, language",
    };

    #[test]
    fn absent_fields_are_skipped() {
        let patch = Patch::new(TARGET)
            .set("is_active", Some(true))
            .set::<bool>("is_verified", None)
            .set("language", Some("en".to_string()));

        assert_eq!(
            patch.assignments(),
            &[
                ("is_active", PatchValue::Bool(true)),
                ("language", PatchValue::Text("en".to_string())),
            ]
        );
    }

    #[test]
    fn renders_only_supplied_columns_in_order() {
        let builder = Patch::new(TARGET)
            .set("is_active", Some(false))
            .set::<bool>("is_verified", None)
            .set("language", Some("en".to_string()))
            .into_query(7)
            .unwrap();

        assert_eq!(
            builder.sql(),
            "UPDATE users SET is_active = $1, language = $2 WHERE user_id = $3 RETURNING user_id, language"
        );
    }

    #[test]
    fn single_field_patch() {
        let builder = Patch::new(TARGET)
            .set("is_verified", Some(true))
            .into_query(1)
            .unwrap();

        assert_eq!(
            builder.sql(),
            "UPDATE users SET is_verified = $1 WHERE user_id = $2 RETURNING user_id, language"
        );
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch = Patch::new(TARGET)
            .set::<bool>("is_active", None)
            .set::<String>("language", None);

        assert!(patch.is_empty());
        assert!(matches!(patch.into_query(1), Err(DbError::EmptyPatch)));
    }

    #[test]
    fn columns_outside_the_allow_list_are_rejected() {
        let result = Patch::new(TARGET)
            .set("is_active", Some(true))
            .set("password_hash", Some("x".to_string()))
            .into_query(1);

        assert!(matches!(
            result,
            Err(DbError::DisallowedColumn("password_hash"))
        ));
    }
}
