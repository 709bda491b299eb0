// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that a required text field is present and not blank.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The submitted value
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty or only whitespace.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}

/// Validates that a poem identifier could refer to a stored poem.
///
/// Backends assign identifiers starting at 1, so zero and negative values
/// are rejected before any query is made.
///
/// # Errors
///
/// Returns `DomainError::InvalidPoemId` if the id is not positive.
pub const fn validate_poem_id(poem_id: i64) -> Result<(), DomainError> {
    if poem_id <= 0 {
        return Err(DomainError::InvalidPoemId(poem_id));
    }
    Ok(())
}

/// Normalizes an optional comment email.
///
/// Surrounding whitespace is trimmed and a blank value becomes `None`.
/// The format is not checked: the email is only a de-duplication key.
#[must_use]
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string)
}
