// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Poem mutations, including the cascade delete.
//!
//! `SQLite` declares `comments.poem_id` without `ON DELETE CASCADE`, while
//! Postgres cascades at the DDL level. Deleting a poem therefore always
//! removes its comments explicitly first, which is redundant but harmless
//! on Postgres and required on `SQLite`.

use poemboard_domain::{NewPoem, PoemEdit, PoemId};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::error::PersistenceError;
use crate::executor::ExecuteOutcome;

/// Inserts a poem and returns its new id.
///
/// # Errors
///
/// Returns an error if the insert fails or the backend reports no id.
pub fn create_poem<C: PersistenceBackend>(
    conn: &mut C,
    poem: &NewPoem,
) -> Result<PoemId, PersistenceError> {
    let outcome: ExecuteOutcome = conn.execute(
        "INSERT INTO poems (title, content) VALUES (?, ?)",
        &[poem.title().into(), poem.content().into()],
    )?;

    let poem_id: PoemId = outcome.last_insert_id.ok_or_else(|| {
        PersistenceError::DatabaseError(String::from("insert into poems returned no id"))
    })?;

    info!(poem_id, "Poem created");
    Ok(poem_id)
}

/// Replaces the title and content of an existing poem.
///
/// The creation timestamp is left untouched.
///
/// # Errors
///
/// Returns `PersistenceError::PoemNotFound` if no poem has this id, or an
/// error if the update fails.
pub fn update_poem<C: PersistenceBackend>(
    conn: &mut C,
    edit: &PoemEdit,
) -> Result<(), PersistenceError> {
    let outcome: ExecuteOutcome = conn.execute(
        "UPDATE poems SET title = ?, content = ? WHERE id = ?",
        &[edit.title().into(), edit.content().into(), edit.id().into()],
    )?;

    if outcome.rows_affected == 0 {
        return Err(PersistenceError::PoemNotFound(edit.id()));
    }

    info!(poem_id = edit.id(), "Poem updated");
    Ok(())
}

/// Deletes a poem and every comment referencing it.
///
/// Comments are deleted first, then the poem, inside one transaction. If
/// either statement fails the transaction is rolled back and nothing is
/// removed, so a failed comment delete can never leave orphans behind.
///
/// Returns the number of poems removed (0 or 1). Deleting an unknown id is
/// not an error.
///
/// # Errors
///
/// Returns an error if either delete fails.
pub fn delete_poem<C: PersistenceBackend>(
    conn: &mut C,
    poem_id: PoemId,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let comments: ExecuteOutcome = conn.execute(
            "DELETE FROM comments WHERE poem_id = ?",
            &[poem_id.into()],
        )?;
        let poems: ExecuteOutcome =
            conn.execute("DELETE FROM poems WHERE id = ?", &[poem_id.into()])?;

        info!(
            poem_id,
            comments_removed = comments.rows_affected,
            poems_removed = poems.rows_affected,
            "Poem deleted"
        );
        Ok(poems.rows_affected)
    })
}

/// Deletes every poem with exactly this title, with their comments.
///
/// This is the maintenance purge used to clear test data. It follows the
/// same comments-first order as [`delete_poem`] in one transaction.
///
/// Returns the number of poems removed.
///
/// # Errors
///
/// Returns an error if either delete fails.
pub fn delete_poems_by_title<C: PersistenceBackend>(
    conn: &mut C,
    title: &str,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let comments: ExecuteOutcome = conn.execute(
            "DELETE FROM comments WHERE poem_id IN (SELECT id FROM poems WHERE title = ?)",
            &[title.into()],
        )?;
        let poems: ExecuteOutcome =
            conn.execute("DELETE FROM poems WHERE title = ?", &[title.into()])?;

        info!(
            title,
            comments_removed = comments.rows_affected,
            poems_removed = poems.rows_affected,
            "Purged poems by title"
        );
        Ok(poems.rows_affected)
    })
}
