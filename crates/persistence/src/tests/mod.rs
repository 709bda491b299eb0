// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod dialect_tests;
mod executor_tests;

use diesel::QueryableByName;
use diesel::sql_types::BigInt;
use poemboard_domain::{CommentId, NewComment, NewPoem, PoemId};

use crate::Persistence;

/// Result type for COUNT queries.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_poem(persistence: &mut Persistence, title: &str) -> PoemId {
    let poem: NewPoem = NewPoem::new(title, "Verde que te quiero verde").unwrap();
    persistence.create_poem(&poem).unwrap()
}

pub fn create_test_comment(
    persistence: &mut Persistence,
    poem_id: PoemId,
    email: Option<&str>,
) -> CommentId {
    let comment: NewComment = NewComment::new(poem_id, "Reader", email, "Lovely").unwrap();
    persistence.submit_comment(&comment).unwrap()
}

pub fn count_rows(persistence: &mut Persistence, table: &str) -> i64 {
    let sql: String = format!("SELECT COUNT(*) AS count FROM {table}");
    persistence
        .fetch_one::<CountRow>(&sql, &[])
        .unwrap()
        .map_or(0, |row| row.count)
}
