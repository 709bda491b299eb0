// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use poemboard_domain::{Poem, PoemId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{IdRow, PoemRow};
use crate::error::PersistenceError;

/// Lists every poem, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_poems<C: PersistenceBackend>(conn: &mut C) -> Result<Vec<Poem>, PersistenceError> {
    let rows: Vec<PoemRow> = conn.fetch_all(
        "SELECT id, title, content, created_at FROM poems ORDER BY created_at DESC, id DESC",
        &[],
    )?;

    debug!(count = rows.len(), "Listed poems");
    Ok(rows.into_iter().map(Poem::from).collect())
}

/// Retrieves a poem by id.
///
/// Returns `None` if no poem has this id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_poem<C: PersistenceBackend>(
    conn: &mut C,
    poem_id: PoemId,
) -> Result<Option<Poem>, PersistenceError> {
    let row: Option<PoemRow> = conn.fetch_one(
        "SELECT id, title, content, created_at FROM poems WHERE id = ?",
        &[poem_id.into()],
    )?;
    Ok(row.map(Poem::from))
}

/// Returns true if a poem with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn poem_exists<C: PersistenceBackend>(
    conn: &mut C,
    poem_id: PoemId,
) -> Result<bool, PersistenceError> {
    let row: Option<IdRow> =
        conn.fetch_one("SELECT id FROM poems WHERE id = ?", &[poem_id.into()])?;
    Ok(row.is_some())
}
