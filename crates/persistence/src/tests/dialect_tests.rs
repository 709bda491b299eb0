// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BackendKind, count_placeholders, is_insert, translate_placeholders, with_returning_id,
    with_single_row_limit,
};

#[test]
fn test_sqlite_statements_pass_through_unchanged() {
    let sql: &str = "SELECT * FROM poems WHERE id = ? AND title = ?";
    assert_eq!(translate_placeholders(sql, BackendKind::Sqlite), sql);
}

#[test]
fn test_postgres_placeholders_are_numbered_left_to_right() {
    let sql: &str = "UPDATE poems SET title = ?, content = ? WHERE id = ?";
    assert_eq!(
        translate_placeholders(sql, BackendKind::Postgres),
        "UPDATE poems SET title = $1, content = $2 WHERE id = $3"
    );
}

#[test]
fn test_postgres_numbering_counts_occurrences_not_values() {
    let sql: &str = "SELECT id FROM comments WHERE poem_id = ? OR id = ? OR poem_id = ?";
    let translated: String = translate_placeholders(sql, BackendKind::Postgres);
    assert_eq!(
        translated,
        "SELECT id FROM comments WHERE poem_id = $1 OR id = $2 OR poem_id = $3"
    );
}

#[test]
fn test_statement_without_placeholders_is_unchanged() {
    let sql: &str = "SELECT id FROM poems";
    assert_eq!(translate_placeholders(sql, BackendKind::Postgres), sql);
    assert_eq!(count_placeholders(sql), 0);
}

#[test]
fn test_question_marks_in_string_literals_are_not_placeholders() {
    let sql: &str = "SELECT id FROM poems WHERE title = 'why?' AND id = ?";
    assert_eq!(count_placeholders(sql), 1);
    assert_eq!(
        translate_placeholders(sql, BackendKind::Postgres),
        "SELECT id FROM poems WHERE title = 'why?' AND id = $1"
    );
}

#[test]
fn test_escaped_quotes_keep_literal_open() {
    let sql: &str = "SELECT id FROM poems WHERE title = 'it''s ?' AND id = ?";
    assert_eq!(count_placeholders(sql), 1);
    assert_eq!(
        translate_placeholders(sql, BackendKind::Postgres),
        "SELECT id FROM poems WHERE title = 'it''s ?' AND id = $1"
    );
}

#[test]
fn test_quoted_identifiers_and_comments_are_skipped() {
    let sql: &str = "SELECT \"odd?\" FROM poems -- any?\nWHERE id = ?";
    assert_eq!(count_placeholders(sql), 1);
    assert_eq!(
        translate_placeholders(sql, BackendKind::Postgres),
        "SELECT \"odd?\" FROM poems -- any?\nWHERE id = $1"
    );
}

#[test]
fn test_is_insert_ignores_case_and_leading_whitespace() {
    assert!(is_insert("  insert into poems (title) values (?)"));
    assert!(is_insert("INSERT INTO poems (title) VALUES (?)"));
    assert!(!is_insert("UPDATE poems SET title = ?"));
    assert!(!is_insert("-- INSERT\nDELETE FROM poems"));
}

#[test]
fn test_returning_id_is_appended_to_inserts() {
    assert_eq!(
        with_returning_id("INSERT INTO poems (title, content) VALUES (?, ?);"),
        "INSERT INTO poems (title, content) VALUES (?, ?) RETURNING id"
    );
}

#[test]
fn test_existing_returning_clause_is_kept() {
    let sql: &str = "INSERT INTO poems (title, content) VALUES (?, ?) RETURNING id";
    assert_eq!(with_returning_id(sql), sql);
}

#[test]
fn test_returning_is_not_added_to_non_inserts() {
    let sql: &str = "DELETE FROM poems WHERE id = ?";
    assert_eq!(with_returning_id(sql), sql);
}

#[test]
fn test_single_row_limit_is_appended() {
    assert_eq!(
        with_single_row_limit("SELECT id FROM poems WHERE id = ?"),
        "SELECT id FROM poems WHERE id = ? LIMIT 1"
    );
}

#[test]
fn test_single_row_limit_respects_existing_limit() {
    let sql: &str = "SELECT id FROM poems ORDER BY id LIMIT 5";
    assert_eq!(with_single_row_limit(sql), sql);
}

#[test]
fn test_limit_inside_literal_does_not_count() {
    assert_eq!(
        with_single_row_limit("SELECT id FROM poems WHERE title = 'LIMIT'"),
        "SELECT id FROM poems WHERE title = 'LIMIT' LIMIT 1"
    );
}

#[test]
fn test_returning_id_lands_before_trailing_comment() {
    let sql: String =
        with_returning_id("INSERT INTO poems (title, content) VALUES (?, ?) -- seed row")
            .into_owned();

    assert_eq!(sql, "INSERT INTO poems (title, content) VALUES (?, ?) RETURNING id");
    assert_eq!(
        translate_placeholders(&sql, BackendKind::Postgres),
        "INSERT INTO poems (title, content) VALUES ($1, $2) RETURNING id"
    );
}

#[test]
fn test_returning_id_after_terminator_and_comment() {
    assert_eq!(
        with_returning_id("INSERT INTO poems (title) VALUES ('a;b'); -- done\n"),
        "INSERT INTO poems (title) VALUES ('a;b') RETURNING id"
    );
}

#[test]
fn test_single_row_limit_lands_before_trailing_comment() {
    assert_eq!(
        with_single_row_limit("SELECT id FROM poems -- newest\n"),
        "SELECT id FROM poems LIMIT 1"
    );
}

#[test]
fn test_clause_keeps_comment_in_the_middle() {
    assert_eq!(
        with_single_row_limit("SELECT id -- the key\nFROM poems WHERE title = '--'"),
        "SELECT id -- the key\nFROM poems WHERE title = '--' LIMIT 1"
    );
}

#[test]
fn test_insert_led_by_with_clause() {
    let sql: &str = "WITH src AS (SELECT ? AS title) INSERT INTO poems (title, content) SELECT title, '' FROM src";

    assert!(is_insert(sql));
    assert_eq!(with_returning_id(sql), format!("{sql} RETURNING id"));
    assert!(!is_insert("WITH recent AS (SELECT id FROM poems) SELECT id FROM recent"));
}

#[test]
fn test_backend_kind_names() {
    assert_eq!(BackendKind::Sqlite.to_string(), "sqlite");
    assert_eq!(BackendKind::Postgres.as_str(), "postgres");
}
