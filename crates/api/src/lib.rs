// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for poemboard.
//!
//! This crate sits between the HTTP server and the persistence adapter.
//! It owns shared-secret authentication, input validation, the mapping
//! from persistence failures to API errors, and the response envelopes
//! the public client expects.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AdminCredential, AuthenticatedAdmin, CredentialError};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_comment, create_poem, delete_comment, delete_poem, edit_poem, get_poem_with_comments,
    list_poems, login, status,
};
pub use request_response::{
    CreateCommentRequest, CreatePoemRequest, CreatedResponse, EditPoemRequest, GetPoemResponse,
    ListPoemsResponse, PoemWithComments, SUCCESS_MESSAGE, StatusResponse, SuccessResponse,
};
