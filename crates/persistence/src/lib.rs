// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for poemboard.
//!
//! This crate stores poems and their comments behind a single adapter,
//! [`Persistence`], that behaves identically on two database engines.
//! It is built on Diesel's raw SQL support.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default): embedded single-file database, also used
//!   in-memory for all standard tests
//! - **Postgres**: networked server, validated via explicit opt-in tests
//!
//! Backend selection happens once, when the adapter is constructed. Callers
//! never see which engine is active.
//!
//! ## Statement Execution
//!
//! Every statement is written once with `?` placeholders and runs through
//! three uniform operations:
//!
//! - [`Persistence::execute`] for mutations, returning [`ExecuteOutcome`]
//! - [`Persistence::fetch_one`] for the first matching row, if any
//! - [`Persistence::fetch_all`] for every matching row in backend order
//!
//! Placeholders are rewritten per backend by [`translate_placeholders`].
//! On Postgres an `INSERT` without `RETURNING` gets `RETURNING id` appended
//! so the new id can be reported; on `SQLite` the id is read from
//! `last_insert_rowid()`.
//!
//! ## Schema
//!
//! There is no migration framework. [`Persistence::initialize_schema`]
//! issues idempotent `CREATE ... IF NOT EXISTS` statements with
//! backend-appropriate DDL. The `comments.poem_id` foreign key cascades on
//! Postgres but not on `SQLite`; the poem delete compensates by removing
//! comments first.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory `SQLite` only
//! - Postgres validation tests are explicitly marked `#[ignore]`
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{PgConnection, SqliteConnection};
use poemboard_domain::{Comment, CommentId, NewComment, NewPoem, Poem, PoemEdit, PoemId};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// in-memory databases never collide between tests.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Runs the same expression against whichever backend connection is active.
///
/// The body is duplicated per variant with `$conn` bound to the concrete
/// connection type; generic functions over `PersistenceBackend` are then
/// monomorphized once per backend.
macro_rules! with_backend {
    ($self:ident, $conn:ident => $body:expr) => {
        match &mut $self.conn {
            BackendConnection::Sqlite($conn) => $body,
            BackendConnection::Postgres($conn) => $body,
        }
    };
}

mod backend;
mod data_models;
mod dialect;
mod error;
mod executor;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::PersistenceBackend;
pub use dialect::{
    BackendKind, PLACEHOLDER, count_placeholders, is_insert, translate_placeholders,
    with_returning_id, with_single_row_limit,
};
pub use error::PersistenceError;
pub use executor::{ExecuteOutcome, Row, SqlValue};

/// Startup-time backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// A private in-memory `SQLite` database.
    SqliteMemory,
    /// A file-backed `SQLite` database.
    SqliteFile(PathBuf),
    /// A Postgres server reachable at this URL.
    Postgres(String),
}

impl BackendConfig {
    /// Returns the engine this configuration selects.
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::SqliteMemory | Self::SqliteFile(_) => BackendKind::Sqlite,
            Self::Postgres(_) => BackendKind::Postgres,
        }
    }
}

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite` or
/// Postgres while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Postgres(PgConnection),
}

/// Persistence adapter for poems and comments.
///
/// The adapter owns its connection. It is constructed once at startup,
/// shared by reference, and closed with [`Persistence::close`].
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Opens the configured backend and initializes its schema.
    ///
    /// A schema failure is logged and does not prevent the adapter from
    /// being returned; it will surface later as query failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect(config: &BackendConfig) -> Result<Self, PersistenceError> {
        let mut persistence: Self = match config {
            BackendConfig::SqliteMemory => Self::open_in_memory()?,
            BackendConfig::SqliteFile(path) => Self::open_file(path)?,
            BackendConfig::Postgres(url) => Self::open_postgres(url)?,
        };

        if let Err(err) = persistence.initialize_schema() {
            error!(backend = %config.kind(), error = %err, "Schema initialization failed");
        }

        Ok(persistence)
    }

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be created.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let mut persistence: Self = Self::open_in_memory()?;
        persistence.initialize_schema()?;
        Ok(persistence)
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema
    /// cannot be created.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let mut persistence: Self = Self::open_file(path.as_ref())?;
        persistence.initialize_schema()?;
        Ok(persistence)
    }

    /// Creates a new persistence adapter with a Postgres database.
    ///
    /// # Arguments
    ///
    /// * `database_url` - The Postgres connection URL
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or its schema
    /// cannot be created.
    pub fn new_with_postgres(database_url: &str) -> Result<Self, PersistenceError> {
        let mut persistence: Self = Self::open_postgres(database_url)?;
        persistence.initialize_schema()?;
        Ok(persistence)
    }

    fn open_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_poems_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    fn open_file(path: &Path) -> Result<Self, PersistenceError> {
        let path_str: &str = path.to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    fn open_postgres(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: PgConnection = backend::postgres::initialize_database(database_url)?;
        backend::postgres::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Postgres(conn),
        })
    }

    /// Returns the engine behind this adapter.
    #[must_use]
    pub const fn backend_kind(&self) -> BackendKind {
        match &self.conn {
            BackendConnection::Sqlite(_) => BackendKind::Sqlite,
            BackendConnection::Postgres(_) => BackendKind::Postgres,
        }
    }

    /// Closes the underlying connection.
    pub fn close(self) {
        info!(backend = %self.backend_kind(), "Closing database connection");
        drop(self.conn);
    }

    /// Creates the `poems` and `comments` tables if they do not exist.
    ///
    /// Safe to run repeatedly against an initialized store.
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    pub fn initialize_schema(&mut self) -> Result<(), PersistenceError> {
        with_backend!(self, conn => conn.initialize_schema())
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        with_backend!(self, conn => conn.verify_foreign_key_enforcement())
    }

    // ========================================================================
    // Uniform Statement Execution
    // ========================================================================

    /// Executes a mutating statement written with `?` placeholders.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the statement.
    pub fn execute(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<ExecuteOutcome, PersistenceError> {
        with_backend!(self, conn => PersistenceBackend::execute(conn, sql, args))
    }

    /// Runs a query and returns its first row, or `None` if nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the query.
    pub fn fetch_one<R: Row>(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Option<R>, PersistenceError> {
        with_backend!(self, conn => PersistenceBackend::fetch_one::<R>(conn, sql, args))
    }

    /// Runs a query and returns every row in the order the backend yields
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the query.
    pub fn fetch_all<R: Row>(
        &mut self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Vec<R>, PersistenceError> {
        with_backend!(self, conn => PersistenceBackend::fetch_all::<R>(conn, sql, args))
    }

    // ========================================================================
    // Poems
    // ========================================================================

    /// Lists every poem, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_poems(&mut self) -> Result<Vec<Poem>, PersistenceError> {
        with_backend!(self, conn => queries::poems::list_poems(conn))
    }

    /// Retrieves a poem by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_poem(&mut self, poem_id: PoemId) -> Result<Option<Poem>, PersistenceError> {
        with_backend!(self, conn => queries::poems::get_poem(conn, poem_id))
    }

    /// Inserts a poem and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_poem(&mut self, poem: &NewPoem) -> Result<PoemId, PersistenceError> {
        with_backend!(self, conn => mutations::poems::create_poem(conn, poem))
    }

    /// Replaces a poem's title and content.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PoemNotFound` if the poem does not exist.
    pub fn update_poem(&mut self, edit: &PoemEdit) -> Result<(), PersistenceError> {
        with_backend!(self, conn => mutations::poems::update_poem(conn, edit))
    }

    /// Deletes a poem and all of its comments atomically.
    ///
    /// Returns the number of poems removed.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails; nothing is removed in that case.
    pub fn delete_poem(&mut self, poem_id: PoemId) -> Result<usize, PersistenceError> {
        with_backend!(self, conn => mutations::poems::delete_poem(conn, poem_id))
    }

    /// Deletes every poem with this exact title, along with their comments.
    ///
    /// Returns the number of poems removed.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails.
    pub fn delete_poems_by_title(&mut self, title: &str) -> Result<usize, PersistenceError> {
        with_backend!(self, conn => mutations::poems::delete_poems_by_title(conn, title))
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Lists the comments on a poem, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_comments(&mut self, poem_id: PoemId) -> Result<Vec<Comment>, PersistenceError> {
        with_backend!(self, conn => queries::comments::list_comments(conn, poem_id))
    }

    /// Stores a comment, enforcing one comment per email per poem.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PoemNotFound` or
    /// `PersistenceError::DuplicateContribution` when the submission is
    /// rejected, or a database error.
    pub fn submit_comment(&mut self, comment: &NewComment) -> Result<CommentId, PersistenceError> {
        with_backend!(self, conn => mutations::comments::submit_comment(conn, comment))
    }

    /// Deletes a single comment.
    ///
    /// Returns the number of comments removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_comment(&mut self, comment_id: CommentId) -> Result<usize, PersistenceError> {
        with_backend!(self, conn => mutations::comments::delete_comment(conn, comment_id))
    }
}
