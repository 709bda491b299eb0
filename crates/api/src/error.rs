// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use poemboard_domain::DomainError;
use poemboard_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied password does not match the shared secret.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Each variant maps to exactly one HTTP status at the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The shared secret did not match.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The email has already been used to comment on this poem.
    DuplicateContribution {
        /// A human-readable description of the rejection.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    ///
    /// The message is for logs only and must not reach clients.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DuplicateContribution { message } => write!(f, "{message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("Missing required data."),
        },
        DomainError::InvalidPoemId(id) => ApiError::InvalidInput {
            field: String::from("poem_id"),
            message: format!("{id} is not a valid poem id"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Only the two domain-level rejections keep their meaning. Everything
/// else becomes `ApiError::Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PoemNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Poem"),
            message: format!("Poem {id} does not exist"),
        },
        PersistenceError::DuplicateContribution { .. } => ApiError::DuplicateContribution {
            message: String::from("You have already left your mark on this poem."),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
