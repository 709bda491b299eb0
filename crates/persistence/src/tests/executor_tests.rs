// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Nullable, Text};

use super::{CountRow, create_test_persistence, create_test_poem};
use crate::{ExecuteOutcome, PersistenceError, SqlValue};

#[derive(Debug, QueryableByName)]
struct TitleRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Text)]
    title: String,
}

#[derive(Debug, QueryableByName)]
struct EmailRow {
    #[diesel(sql_type = Nullable<Text>)]
    email: Option<String>,
}

#[test]
fn test_insert_reports_new_id() {
    let mut persistence = create_test_persistence();

    let first: ExecuteOutcome = persistence
        .execute(
            "INSERT INTO poems (title, content) VALUES (?, ?)",
            &["One".into(), "Body".into()],
        )
        .unwrap();
    let second: ExecuteOutcome = persistence
        .execute(
            "INSERT INTO poems (title, content) VALUES (?, ?)",
            &["Two".into(), "Body".into()],
        )
        .unwrap();

    assert_eq!(first.rows_affected, 1);
    assert_eq!(first.last_insert_id, Some(1));
    assert_eq!(second.last_insert_id, Some(2));
}

#[test]
fn test_update_reports_rows_affected_without_id() {
    let mut persistence = create_test_persistence();
    create_test_poem(&mut persistence, "Same");
    create_test_poem(&mut persistence, "Same");
    create_test_poem(&mut persistence, "Other");

    let outcome: ExecuteOutcome = persistence
        .execute(
            "UPDATE poems SET content = ? WHERE title = ?",
            &["Changed".into(), "Same".into()],
        )
        .unwrap();

    assert_eq!(outcome.rows_affected, 2);
    assert_eq!(outcome.last_insert_id, None);
}

#[test]
fn test_update_matching_nothing_affects_zero_rows() {
    let mut persistence = create_test_persistence();

    let outcome: ExecuteOutcome = persistence
        .execute("DELETE FROM poems WHERE id = ?", &[42_i64.into()])
        .unwrap();

    assert_eq!(outcome, ExecuteOutcome::default());
}

#[test]
fn test_fetch_all_returns_rows_in_query_order() {
    let mut persistence = create_test_persistence();
    create_test_poem(&mut persistence, "B");
    create_test_poem(&mut persistence, "A");

    let rows: Vec<TitleRow> = persistence
        .fetch_all("SELECT id, title FROM poems ORDER BY title", &[])
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "A");
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[1].title, "B");
}

#[test]
fn test_fetch_all_empty_result_is_empty_vec() {
    let mut persistence = create_test_persistence();

    let rows: Vec<TitleRow> = persistence
        .fetch_all("SELECT id, title FROM poems WHERE title = ?", &["none".into()])
        .unwrap();

    assert!(rows.is_empty());
}

#[test]
fn test_fetch_one_returns_none_when_nothing_matches() {
    let mut persistence = create_test_persistence();

    let row: Option<TitleRow> = persistence
        .fetch_one("SELECT id, title FROM poems WHERE id = ?", &[7_i64.into()])
        .unwrap();

    assert!(row.is_none());
}

#[test]
fn test_fetch_one_returns_first_row() {
    let mut persistence = create_test_persistence();
    create_test_poem(&mut persistence, "First");
    create_test_poem(&mut persistence, "Second");

    let row: Option<TitleRow> = persistence
        .fetch_one("SELECT id, title FROM poems ORDER BY id DESC", &[])
        .unwrap();

    assert_eq!(row.map(|r| r.title), Some(String::from("Second")));
}

#[test]
fn test_fetch_one_with_trailing_comment() {
    let mut persistence = create_test_persistence();
    create_test_poem(&mut persistence, "First");
    create_test_poem(&mut persistence, "Second");

    let row: Option<TitleRow> = persistence
        .fetch_one("SELECT id, title FROM poems ORDER BY id -- oldest\n", &[])
        .unwrap();

    assert_eq!(row.map(|r| r.id), Some(1));
}

#[test]
fn test_null_binds_as_sql_null() {
    let mut persistence = create_test_persistence();
    let poem_id = create_test_poem(&mut persistence, "Poem");

    persistence
        .execute(
            "INSERT INTO comments (poem_id, author, email, content) VALUES (?, ?, ?, ?)",
            &[
                poem_id.into(),
                "Anon".into(),
                SqlValue::from(None::<&str>),
                "Hi".into(),
            ],
        )
        .unwrap();

    let row: Option<EmailRow> = persistence
        .fetch_one("SELECT email FROM comments WHERE poem_id = ?", &[poem_id.into()])
        .unwrap();
    assert_eq!(row.map(|r| r.email), Some(None));

    let nulls: Option<CountRow> = persistence
        .fetch_one(
            "SELECT COUNT(*) AS count FROM comments WHERE email IS NULL",
            &[],
        )
        .unwrap();
    assert_eq!(nulls.map(|r| r.count), Some(1));
}

#[test]
fn test_missing_argument_surfaces_as_database_error() {
    let mut persistence = create_test_persistence();

    // The unbound second placeholder reaches the backend as NULL.
    let result = persistence.execute(
        "INSERT INTO poems (title, content) VALUES (?, ?)",
        &["Only title".into()],
    );

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_malformed_sql_surfaces_as_database_error() {
    let mut persistence = create_test_persistence();

    let result = persistence.fetch_all::<TitleRow>("SELEC id, title FROM poems", &[]);

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_sql_value_conversions() {
    assert_eq!(SqlValue::from(5_i64), SqlValue::Integer(5));
    assert_eq!(SqlValue::from("a"), SqlValue::Text(String::from("a")));
    assert_eq!(SqlValue::from(Some("b")), SqlValue::Text(String::from("b")));
    assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
}
