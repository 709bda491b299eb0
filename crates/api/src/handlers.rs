// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler validates its input, calls the persistence adapter, and
//! returns an API response. Admin writes take an [`AuthenticatedAdmin`],
//! so they cannot be reached without the shared secret.

use poemboard_domain::{Comment, CommentId, NewComment, NewPoem, Poem, PoemEdit, PoemId};
use poemboard_persistence::{BackendKind, Persistence};
use tracing::{debug, info};

use crate::auth::{AdminCredential, AuthenticatedAdmin};
use crate::error::ApiError;
use crate::request_response::{
    CreateCommentRequest, CreatePoemRequest, CreatedResponse, EditPoemRequest, GetPoemResponse,
    ListPoemsResponse, PoemWithComments, SUCCESS_MESSAGE, StatusResponse, SuccessResponse,
};

/// Lists every poem, newest first.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the backend fails.
pub fn list_poems(persistence: &mut Persistence) -> Result<ListPoemsResponse, ApiError> {
    let poems: Vec<Poem> = persistence.list_poems()?;
    debug!(count = poems.len(), "Listed poems");

    Ok(ListPoemsResponse {
        message: String::from(SUCCESS_MESSAGE),
        data: poems,
    })
}

/// Retrieves a poem with its comments, newest comment first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the poem does not exist, or
/// `ApiError::Internal` if the backend fails.
pub fn get_poem_with_comments(
    persistence: &mut Persistence,
    poem_id: PoemId,
) -> Result<GetPoemResponse, ApiError> {
    let poem: Poem = persistence
        .get_poem(poem_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Poem"),
            message: format!("Poem {poem_id} does not exist"),
        })?;
    let comments: Vec<Comment> = persistence.list_comments(poem_id)?;

    Ok(GetPoemResponse {
        message: String::from(SUCCESS_MESSAGE),
        data: PoemWithComments { poem, comments },
    })
}

/// Creates a poem.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the title or content is blank, or
/// `ApiError::Internal` if the backend fails.
pub fn create_poem(
    persistence: &mut Persistence,
    _admin: &AuthenticatedAdmin,
    request: &CreatePoemRequest,
) -> Result<CreatedResponse, ApiError> {
    let poem: NewPoem = NewPoem::new(&request.title, &request.content)?;
    let poem_id: PoemId = persistence.create_poem(&poem)?;

    info!(poem_id, "Created poem");
    Ok(CreatedResponse::new(poem_id))
}

/// Replaces a poem's title and content.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for blank fields or a non-positive id,
/// `ApiError::ResourceNotFound` if the poem does not exist, or
/// `ApiError::Internal` if the backend fails.
pub fn edit_poem(
    persistence: &mut Persistence,
    _admin: &AuthenticatedAdmin,
    request: &EditPoemRequest,
) -> Result<SuccessResponse, ApiError> {
    let edit: PoemEdit = PoemEdit::new(request.id, &request.title, &request.content)?;
    persistence.update_poem(&edit)?;

    info!(poem_id = request.id, "Edited poem");
    Ok(SuccessResponse::ok())
}

/// Deletes a poem and all of its comments.
///
/// Deleting an id that does not exist succeeds and removes nothing.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the backend fails. Nothing is removed
/// in that case.
pub fn delete_poem(
    persistence: &mut Persistence,
    _admin: &AuthenticatedAdmin,
    poem_id: PoemId,
) -> Result<SuccessResponse, ApiError> {
    let removed: usize = persistence.delete_poem(poem_id)?;

    info!(poem_id, removed, "Deleted poem");
    Ok(SuccessResponse::ok())
}

/// Stores a public comment submission.
///
/// No authentication is required. Validation happens before any backend
/// call is made.
///
/// # Errors
///
/// Returns:
/// - `ApiError::InvalidInput` if the poem id, author, or content is missing
/// - `ApiError::ResourceNotFound` if the poem does not exist
/// - `ApiError::DuplicateContribution` if the email already commented here
/// - `ApiError::Internal` if the backend fails
pub fn create_comment(
    persistence: &mut Persistence,
    request: &CreateCommentRequest,
) -> Result<CreatedResponse, ApiError> {
    let comment: NewComment = NewComment::new(
        request.poem_id,
        &request.author,
        request.email.as_deref(),
        &request.content,
    )?;
    let comment_id: CommentId = persistence.submit_comment(&comment)?;

    info!(poem_id = request.poem_id, comment_id, "Created comment");
    Ok(CreatedResponse::new(comment_id))
}

/// Deletes a single comment.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the backend fails.
pub fn delete_comment(
    persistence: &mut Persistence,
    _admin: &AuthenticatedAdmin,
    comment_id: CommentId,
) -> Result<SuccessResponse, ApiError> {
    let removed: usize = persistence.delete_comment(comment_id)?;

    info!(comment_id, removed, "Deleted comment");
    Ok(SuccessResponse::ok())
}

/// Checks a password against the shared secret.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the password is wrong.
pub fn login(credential: &AdminCredential, password: &str) -> Result<SuccessResponse, ApiError> {
    credential.authenticate(password)?;
    info!("Admin login succeeded");
    Ok(SuccessResponse::ok())
}

/// Reports which backend is active.
#[must_use]
pub fn status(backend: BackendKind, has_postgres_url: bool) -> StatusResponse {
    StatusResponse {
        backend: backend.to_string(),
        has_postgres_url,
    }
}
