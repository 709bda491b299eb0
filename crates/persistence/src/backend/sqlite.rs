// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module contains SQLite-specific initialization, schema DDL,
//! and helper functions that the generic executor cannot express.
//!
//! ## Referential Integrity
//!
//! The `comments.poem_id` foreign key is declared without a cascading
//! delete. With `PRAGMA foreign_keys = ON` a poem that still has comments
//! cannot be deleted, so the cascade delete in `mutations::poems` removes
//! the comments first.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema statements for `SQLite`, applied in order.
///
/// Every statement is idempotent.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS poems (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        poem_id INTEGER NOT NULL,
        author TEXT NOT NULL,
        email TEXT,
        content TEXT NOT NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (poem_id) REFERENCES poems (id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_poem_id ON comments (poem_id)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_comments_poem_email
        ON comments (poem_id, email)
        WHERE email IS NOT NULL AND email <> ''",
];

/// Helper row struct for PRAGMA queries.
///
/// This is a justified use of raw SQL as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Helper function to get the last inserted row ID.
///
/// `SQLite` reports the id of the most recent insert per connection, which
/// is safe here because the connection is never shared mid-statement.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Creates the `SQLite` schema if it does not already exist.
///
/// # Errors
///
/// Returns an error naming the first statement that failed.
pub fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Initializing SQLite schema");
    for statement in SCHEMA {
        debug!(sql = statement, "Applying schema statement");
        diesel::sql_query(*statement)
            .execute(conn)
            .map_err(|e| PersistenceError::SchemaFailed(e.to_string()))?;
    }
    Ok(())
}

/// Opens a `SQLite` database at the given URL with foreign keys enabled.
///
/// The schema is not created here; see [`initialize_schema`].
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;

    Ok(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::DatabaseError(e.to_string()))?;
    Ok(())
}
