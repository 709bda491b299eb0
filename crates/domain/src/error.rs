// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was missing or blank.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// A poem identifier was not a positive integer.
    InvalidPoemId(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidPoemId(id) => write!(f, "Invalid poem id: {id}"),
        }
    }
}

impl std::error::Error for DomainError {}
