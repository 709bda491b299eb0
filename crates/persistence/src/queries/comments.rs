// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use poemboard_domain::{Comment, PoemId};

use crate::backend::PersistenceBackend;
use crate::data_models::{CommentRow, IdRow};
use crate::error::PersistenceError;

/// Lists the comments on a poem, newest first.
///
/// An unknown poem yields an empty list.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_comments<C: PersistenceBackend>(
    conn: &mut C,
    poem_id: PoemId,
) -> Result<Vec<Comment>, PersistenceError> {
    let rows: Vec<CommentRow> = conn.fetch_all(
        "SELECT id, poem_id, author, email, content, created_at FROM comments \
         WHERE poem_id = ? ORDER BY created_at DESC, id DESC",
        &[poem_id.into()],
    )?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

/// Finds the id of an existing comment on `poem_id` with this email.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_comment_by_email<C: PersistenceBackend>(
    conn: &mut C,
    poem_id: PoemId,
    email: &str,
) -> Result<Option<i64>, PersistenceError> {
    let row: Option<IdRow> = conn.fetch_one(
        "SELECT id FROM comments WHERE poem_id = ? AND email = ?",
        &[poem_id.into(), email.into()],
    )?;
    Ok(row.map(|r| r.id))
}
