// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared-secret authentication.
//!
//! Every write except comment submission requires the single administrator
//! password. The secret is hashed with bcrypt once at startup and only the
//! hash is kept; each request is checked with `bcrypt::verify`.

use thiserror::Error;
use tracing::{info, warn};

use crate::error::AuthError;

/// Errors raised while configuring the administrator credential.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The configured secret is empty or whitespace.
    #[error("Admin password must not be empty")]
    EmptySecret,

    /// The secret could not be hashed.
    #[error("Failed to hash admin password: {0}")]
    HashFailed(String),
}

/// The administrator's shared secret, stored as a bcrypt hash.
#[derive(Clone)]
pub struct AdminCredential {
    password_hash: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl AdminCredential {
    /// Hashes the shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The plaintext administrator password
    /// * `cost` - The bcrypt cost factor
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is blank or hashing fails.
    pub fn new(secret: &str, cost: u32) -> Result<Self, CredentialError> {
        if secret.trim().is_empty() {
            return Err(CredentialError::EmptySecret);
        }

        let password_hash: String =
            bcrypt::hash(secret, cost).map_err(|e| CredentialError::HashFailed(e.to_string()))?;

        info!(cost, "Admin credential configured");
        Ok(Self { password_hash })
    }

    /// Checks a submitted password against the shared secret.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the password does not
    /// match or cannot be checked.
    pub fn authenticate(&self, password: &str) -> Result<AuthenticatedAdmin, AuthError> {
        match bcrypt::verify(password, &self.password_hash) {
            Ok(true) => Ok(AuthenticatedAdmin { _private: () }),
            Ok(false) => {
                warn!("Rejected admin password");
                Err(AuthError::AuthenticationFailed {
                    reason: String::from("Incorrect password"),
                })
            }
            Err(e) => {
                warn!(error = %e, "Admin password verification failed");
                Err(AuthError::AuthenticationFailed {
                    reason: String::from("Incorrect password"),
                })
            }
        }
    }
}

/// Proof that the caller presented the shared secret.
///
/// Only [`AdminCredential::authenticate`] can construct this, so a handler
/// that takes it cannot run without a successful check.
#[derive(Debug)]
pub struct AuthenticatedAdmin {
    _private: (),
}
