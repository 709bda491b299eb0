// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A statement failed to execute on the backend.
    ///
    /// This covers malformed SQL, placeholder/argument mismatches,
    /// constraint violations other than uniqueness, and lost connections.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// A uniqueness constraint was violated.
    UniqueViolation(String),
    /// Schema creation failed.
    SchemaFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested poem was not found.
    PoemNotFound(i64),
    /// A comment with this email already exists on the poem.
    DuplicateContribution {
        /// The poem the comment was submitted for.
        poem_id: i64,
        /// The email that was already used.
        email: String,
    },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::SchemaFailed(msg) => write!(f, "Schema initialization failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::PoemNotFound(id) => write!(f, "Poem not found: {id}"),
            Self::DuplicateContribution { poem_id, email } => {
                write!(
                    f,
                    "Duplicate contribution: {email} has already commented on poem {poem_id}"
                )
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
