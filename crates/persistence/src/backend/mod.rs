// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates everything that differs between the two supported
//! engines: connection setup, schema DDL, placeholder syntax, and the way
//! each engine reports inserted identifiers and affected rows.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` backend (default for development and testing)
//! - `postgres`: Postgres backend (validated via opt-in tests)
//!
//! ## Backend-Agnostic Code
//!
//! Queries and mutations in `queries/` and `mutations/` are written once,
//! with `?` placeholders, against the [`PersistenceBackend`] trait. They
//! never inspect which engine is active.

pub mod postgres;
pub mod sqlite;

use diesel::pg::Pg;
use diesel::sqlite::Sqlite;
use diesel::{Connection, PgConnection, RunQueryDsl, SqliteConnection};

use crate::data_models::IdRow;
use crate::dialect::{BackendKind, is_insert, with_returning_id, with_single_row_limit};
use crate::error::PersistenceError;
use crate::executor::{ExecuteOutcome, Row, SqlValue, bind_args, prepare_statement};

/// Uniform statement interface implemented by each backend connection.
///
/// This trait is implemented for both `SqliteConnection` and `PgConnection`.
/// Query and mutation functions are generic over it, so a single
/// implementation serves both engines.
pub trait PersistenceBackend: Connection {
    /// The engine behind this connection.
    const KIND: BackendKind;

    /// Executes a mutating statement.
    ///
    /// For `INSERT` statements the identifier of the new row is reported in
    /// `last_insert_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the statement.
    fn execute(&mut self, sql: &str, args: &[SqlValue])
    -> Result<ExecuteOutcome, PersistenceError>;

    /// Runs a query and returns every row in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the query or a row cannot
    /// be decoded as `R`.
    fn fetch_all<R: Row>(&mut self, sql: &str, args: &[SqlValue])
    -> Result<Vec<R>, PersistenceError>;

    /// Runs a query and returns its first row, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the query or the row cannot
    /// be decoded as `R`.
    fn fetch_one<R: Row>(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Option<R>, PersistenceError> {
        let limited = with_single_row_limit(sql);
        Ok(self.fetch_all::<R>(&limited, args)?.into_iter().next())
    }

    /// Creates the `poems` and `comments` tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    fn initialize_schema(&mut self) -> Result<(), PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    const KIND: BackendKind = BackendKind::Sqlite;

    fn execute(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<ExecuteOutcome, PersistenceError> {
        let statement: String = prepare_statement(sql, Self::KIND, args);
        let rows_affected: usize = bind_args::<Sqlite>(statement, args).execute(self)?;

        let last_insert_id: Option<i64> = if is_insert(sql) {
            Some(sqlite::get_last_insert_rowid(self)?)
        } else {
            None
        };

        Ok(ExecuteOutcome {
            last_insert_id,
            rows_affected,
        })
    }

    fn fetch_all<R: Row>(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Vec<R>, PersistenceError> {
        let statement: String = prepare_statement(sql, Self::KIND, args);
        Ok(bind_args::<Sqlite>(statement, args).load::<R>(self)?)
    }

    fn initialize_schema(&mut self) -> Result<(), PersistenceError> {
        sqlite::initialize_schema(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for PgConnection {
    const KIND: BackendKind = BackendKind::Postgres;

    fn execute(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<ExecuteOutcome, PersistenceError> {
        if !is_insert(sql) {
            let statement: String = prepare_statement(sql, Self::KIND, args);
            let rows_affected: usize = bind_args::<Pg>(statement, args).execute(self)?;
            return Ok(ExecuteOutcome {
                last_insert_id: None,
                rows_affected,
            });
        }

        // Postgres has no per-connection insert id; ask for it in the result set.
        let returning = with_returning_id(sql);
        let statement: String = prepare_statement(&returning, Self::KIND, args);
        let rows: Vec<IdRow> = bind_args::<Pg>(statement, args).load::<IdRow>(self)?;

        Ok(ExecuteOutcome {
            last_insert_id: rows.first().map(|row| row.id),
            rows_affected: rows.len(),
        })
    }

    fn fetch_all<R: Row>(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Vec<R>, PersistenceError> {
        let statement: String = prepare_statement(sql, Self::KIND, args);
        Ok(bind_args::<Pg>(statement, args).load::<R>(self)?)
    }

    fn initialize_schema(&mut self) -> Result<(), PersistenceError> {
        postgres::initialize_schema(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        postgres::verify_foreign_key_enforcement(self)
    }
}
