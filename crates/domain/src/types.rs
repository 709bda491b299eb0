// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::{normalize_email, validate_poem_id, validate_required};

/// Backend-assigned poem identifier.
pub type PoemId = i64;

/// Backend-assigned comment identifier.
pub type CommentId = i64;

/// A stored poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    /// The poem identifier.
    pub id: PoemId,
    /// The poem title.
    pub title: String,
    /// The poem body, an HTML fragment.
    pub content: String,
    /// Server-assigned creation time.
    pub created_at: NaiveDateTime,
}

/// A stored comment on a poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The comment identifier.
    pub id: CommentId,
    /// The poem this comment belongs to.
    pub poem_id: PoemId,
    /// Display name of the author.
    pub author: String,
    /// Optional email, used only to de-duplicate submissions per poem.
    pub email: Option<String>,
    /// The comment text.
    pub content: String,
    /// Server-assigned creation time.
    pub created_at: NaiveDateTime,
}

/// A validated poem ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoem {
    title: String,
    content: String,
}

impl NewPoem {
    /// Creates a new poem after checking that title and content are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the title or content is blank.
    pub fn new(title: &str, content: &str) -> Result<Self, DomainError> {
        validate_required("title", title)?;
        validate_required("content", content)?;
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A validated replacement of a poem's title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemEdit {
    id: PoemId,
    title: String,
    content: String,
}

impl PoemEdit {
    /// Creates an edit for an existing poem.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not positive or if the title or
    /// content is blank.
    pub fn new(id: PoemId, title: &str, content: &str) -> Result<Self, DomainError> {
        validate_poem_id(id)?;
        validate_required("title", title)?;
        validate_required("content", content)?;
        Ok(Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    /// Returns the id of the poem being edited.
    #[must_use]
    pub const fn id(&self) -> PoemId {
        self.id
    }

    /// Returns the new title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the new content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A validated public comment submission.
///
/// A blank email is stored as `None` and is never subject to the
/// one-comment-per-email rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    poem_id: PoemId,
    author: String,
    email: Option<String>,
    content: String,
}

impl NewComment {
    /// Creates a new comment submission.
    ///
    /// # Arguments
    ///
    /// * `poem_id` - The poem being commented on
    /// * `author` - The author's display name
    /// * `email` - Optional email (blank values are treated as absent)
    /// * `content` - The comment text
    ///
    /// # Errors
    ///
    /// Returns an error if the poem id is not positive or the author or
    /// content is blank.
    pub fn new(
        poem_id: PoemId,
        author: &str,
        email: Option<&str>,
        content: &str,
    ) -> Result<Self, DomainError> {
        validate_poem_id(poem_id)?;
        validate_required("author", author)?;
        validate_required("content", content)?;
        Ok(Self {
            poem_id,
            author: author.to_string(),
            email: normalize_email(email),
            content: content.to_string(),
        })
    }

    /// Returns the poem id.
    #[must_use]
    pub const fn poem_id(&self) -> PoemId {
        self.poem_id
    }

    /// Returns the author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the normalized email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
