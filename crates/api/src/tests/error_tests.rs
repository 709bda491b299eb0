// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use poemboard_domain::DomainError;
use poemboard_persistence::PersistenceError;

use crate::{ApiError, AuthError, translate_domain_error, translate_persistence_error};

#[test]
fn test_missing_field_becomes_invalid_input() {
    let err: ApiError = translate_domain_error(DomainError::MissingField { field: "author" });
    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("author"),
            message: String::from("Missing required data."),
        }
    );
}

#[test]
fn test_poem_not_found_becomes_resource_not_found() {
    let err: ApiError = translate_persistence_error(PersistenceError::PoemNotFound(3));
    assert!(matches!(err, ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Poem"));
}

#[test]
fn test_duplicate_hides_the_email() {
    let err: ApiError = translate_persistence_error(PersistenceError::DuplicateContribution {
        poem_id: 1,
        email: String::from("secret@x.com"),
    });

    assert!(matches!(err, ApiError::DuplicateContribution { .. }));
    assert!(!err.to_string().contains("secret@x.com"));
}

#[test]
fn test_backend_failures_become_internal() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::DatabaseError(String::from("boom")));
    assert!(matches!(err, ApiError::Internal { .. }));

    let err: ApiError = PersistenceError::UniqueViolation(String::from("idx")).into();
    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_auth_error_converts() {
    let err: ApiError = AuthError::AuthenticationFailed {
        reason: String::from("Incorrect password"),
    }
    .into();
    assert_eq!(err.to_string(), "Authentication failed: Incorrect password");
}
