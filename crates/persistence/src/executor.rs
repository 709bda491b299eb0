// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Uniform statement execution types shared by both backends.
//!
//! Each backend reports results in its own shape: `SQLite` exposes an
//! affected-row count and a per-connection `last_insert_rowid()`, while
//! Postgres returns rows from a `RETURNING` clause. Both are normalized
//! into [`ExecuteOutcome`] for mutations and into typed [`Row`] values for
//! queries.

use diesel::backend::Backend;
use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::serialize::ToSql;
use diesel::sql_types::{BigInt, HasSqlType, Nullable, Text};
use diesel::sqlite::Sqlite;
use diesel::QueryableByName;
use tracing::{debug, warn};

use crate::dialect::{BackendKind, count_placeholders, translate_placeholders};

/// A runtime value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// SQL `NULL`, bound as nullable text.
    Null,
    /// A 64-bit integer.
    Integer(i64),
    /// A text value.
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The normalized result of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteOutcome {
    /// Identifier of the inserted row, for `INSERT` statements.
    pub last_insert_id: Option<i64>,
    /// Number of rows the backend reports as affected.
    pub rows_affected: usize,
}

/// A row type that can be loaded from either backend.
///
/// Any `#[derive(QueryableByName)]` struct whose field types are supported
/// by both backends satisfies this automatically.
pub trait Row: QueryableByName<Sqlite> + QueryableByName<Pg> + 'static {}

impl<T> Row for T where T: QueryableByName<Sqlite> + QueryableByName<Pg> + 'static {}

/// Translates a statement for `kind` and logs it.
///
/// A mismatch between the placeholder count and the argument count is
/// logged but not rejected; the backend reports it when the statement runs.
pub(crate) fn prepare_statement(sql: &str, kind: BackendKind, args: &[SqlValue]) -> String {
    let placeholders: usize = count_placeholders(sql);
    if placeholders != args.len() {
        warn!(
            backend = %kind,
            placeholders,
            args = args.len(),
            sql,
            "Placeholder count does not match argument count"
        );
    }

    let translated: String = translate_placeholders(sql, kind);
    debug!(backend = %kind, sql = %translated, args = args.len(), "Prepared statement");
    translated
}

/// Builds a raw SQL query with every argument bound in order.
pub(crate) fn bind_args<DB>(sql: String, args: &[SqlValue]) -> BoxedSqlQuery<'static, DB, SqlQuery>
where
    DB: Backend + HasSqlType<BigInt> + HasSqlType<Text>,
    i64: ToSql<BigInt, DB>,
    String: ToSql<Text, DB>,
    Option<String>: ToSql<Nullable<Text>, DB>,
{
    let mut query: BoxedSqlQuery<'static, DB, SqlQuery> = diesel::sql_query(sql).into_boxed();
    for arg in args {
        query = match arg {
            SqlValue::Null => query.bind::<Nullable<Text>, _>(None::<String>),
            SqlValue::Integer(value) => query.bind::<BigInt, _>(*value),
            SqlValue::Text(value) => query.bind::<Text, _>(value.clone()),
        };
    }
    query
}
