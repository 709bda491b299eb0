// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Comment mutations and the one-comment-per-email guard.
//!
//! A poem accepts at most one comment per non-empty email. The guard looks
//! for an existing comment and inserts only if none is found, inside one
//! transaction. The partial unique index `idx_comments_poem_email` backs
//! this up: if two submissions race past the check, the second insert
//! fails with a uniqueness violation, which is reported as the same
//! duplicate contribution.

use poemboard_domain::{CommentId, NewComment};
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::error::PersistenceError;
use crate::executor::ExecuteOutcome;
use crate::queries::comments::find_comment_by_email;
use crate::queries::poems::poem_exists;

/// Stores a public comment submission and returns its id.
///
/// # Errors
///
/// Returns:
/// - `PersistenceError::PoemNotFound` if the poem does not exist
/// - `PersistenceError::DuplicateContribution` if the email has already
///   commented on this poem
/// - a database error if any statement fails
pub fn submit_comment<C: PersistenceBackend>(
    conn: &mut C,
    comment: &NewComment,
) -> Result<CommentId, PersistenceError> {
    let poem_id: i64 = comment.poem_id();

    let result: Result<ExecuteOutcome, PersistenceError> =
        conn.transaction::<ExecuteOutcome, PersistenceError, _>(|conn| {
            if !poem_exists(conn, poem_id)? {
                return Err(PersistenceError::PoemNotFound(poem_id));
            }

            if let Some(email) = comment.email() {
                if let Some(existing) = find_comment_by_email(conn, poem_id, email)? {
                    info!(poem_id, existing, "Rejected duplicate contribution");
                    return Err(duplicate(poem_id, email));
                }
            }

            conn.execute(
                "INSERT INTO comments (poem_id, author, email, content) VALUES (?, ?, ?, ?)",
                &[
                    poem_id.into(),
                    comment.author().into(),
                    comment.email().into(),
                    comment.content().into(),
                ],
            )
        });

    let outcome: ExecuteOutcome = match result {
        Ok(outcome) => outcome,
        Err(PersistenceError::UniqueViolation(msg)) => {
            warn!(poem_id, error = %msg, "Concurrent duplicate contribution caught by index");
            let email: &str = comment.email().unwrap_or_default();
            return Err(duplicate(poem_id, email));
        }
        Err(err) => return Err(err),
    };

    let comment_id: CommentId = outcome.last_insert_id.ok_or_else(|| {
        PersistenceError::DatabaseError(String::from("insert into comments returned no id"))
    })?;

    info!(poem_id, comment_id, "Comment created");
    Ok(comment_id)
}

/// Deletes a single comment.
///
/// Returns the number of comments removed (0 or 1).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_comment<C: PersistenceBackend>(
    conn: &mut C,
    comment_id: CommentId,
) -> Result<usize, PersistenceError> {
    let outcome: ExecuteOutcome =
        conn.execute("DELETE FROM comments WHERE id = ?", &[comment_id.into()])?;

    info!(
        comment_id,
        removed = outcome.rows_affected,
        "Comment deleted"
    );
    Ok(outcome.rows_affected)
}

fn duplicate(poem_id: i64, email: &str) -> PersistenceError {
    PersistenceError::DuplicateContribution {
        poem_id,
        email: email.to_string(),
    }
}
