// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Response shapes follow the public client contract:
//! reads are wrapped as `{"message": "success", "data": ...}`, creates
//! return `{"message": "success", "id": ...}`, and admin writes return
//! `{"success": true}`.

use poemboard_domain::{Comment, Poem, PoemId};
use serde::{Deserialize, Serialize};

/// The literal `message` value used by read and create responses.
pub const SUCCESS_MESSAGE: &str = "success";

/// API request to create a new poem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePoemRequest {
    /// The poem title.
    pub title: String,
    /// The poem body (an HTML fragment).
    pub content: String,
}

/// API request to replace a poem's title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPoemRequest {
    /// The poem to edit.
    pub id: PoemId,
    /// The new title.
    pub title: String,
    /// The new body.
    pub content: String,
}

/// API request to submit a public comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    /// The poem being commented on.
    pub poem_id: PoemId,
    /// The author's display name.
    pub author: String,
    /// Optional email, used only to prevent repeat comments.
    pub email: Option<String>,
    /// The comment text.
    pub content: String,
}

/// API response listing every poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPoemsResponse {
    /// Always `"success"`.
    pub message: String,
    /// Poems, newest first.
    pub data: Vec<Poem>,
}

/// A poem together with its comments.
///
/// The poem fields are flattened next to `comments` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemWithComments {
    #[serde(flatten)]
    pub poem: Poem,
    /// Comments, newest first.
    pub comments: Vec<Comment>,
}

/// API response for a single poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPoemResponse {
    /// Always `"success"`.
    pub message: String,
    pub data: PoemWithComments,
}

/// API response for a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Always `"success"`.
    pub message: String,
    /// The id of the new poem or comment.
    pub id: i64,
}

impl CreatedResponse {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            message: String::from(SUCCESS_MESSAGE),
            id,
        }
    }
}

/// API response for admin writes and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// API response describing the active storage backend.
///
/// The Postgres URL itself is never reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// `"sqlite"` or `"postgres"`.
    pub backend: String,
    /// Whether a Postgres URL was configured at startup.
    pub has_postgres_url: bool,
}
