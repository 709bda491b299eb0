// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Placeholder dialect translation.
//!
//! All statements in this crate are written once, using `?` as a positional
//! placeholder. Before a statement reaches a backend it is rewritten into
//! that backend's placeholder syntax:
//!
//! - `SQLite` accepts `?` natively, so statements pass through unchanged.
//! - Postgres requires numbered placeholders. Each `?` is replaced, in
//!   left-to-right order of appearance, with `$1`, `$2`, and so on.
//!   Numbering is by occurrence, not by value: a value referenced twice
//!   must be supplied twice in the argument list.
//!
//! ## Grammar
//!
//! A `?` is a placeholder only when it appears in statement code. The
//! scanner skips:
//!
//! - single-quoted string literals (`'it''s?'`, with `''` as an escaped quote)
//! - double-quoted identifiers (`"odd?name"`)
//! - `--` line comments, up to the end of the line
//!
//! Arity is never validated here. A placeholder count that does not match
//! the argument count is reported by the backend when the statement runs.

use std::borrow::Cow;

/// The generic positional placeholder used by every statement in this crate.
pub const PLACEHOLDER: char = '?';

/// The storage engines behind the persistence adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Embedded single-file `SQLite` database.
    Sqlite,
    /// Networked Postgres server.
    Postgres,
}

impl BackendKind {
    /// Returns the lowercase backend name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
}

/// Tags each character of a statement with the region it belongs to.
///
/// Quote delimiters belong to their quoted region and comment markers to
/// the comment.
fn classify(sql: &str) -> Vec<(char, Region)> {
    let mut region: Region = Region::Code;
    let mut out: Vec<(char, Region)> = Vec::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        let tag: Region = match region {
            Region::Code => {
                region = match c {
                    '\'' => Region::SingleQuoted,
                    '"' => Region::DoubleQuoted,
                    '-' if chars.peek() == Some(&'-') => Region::LineComment,
                    _ => Region::Code,
                };
                region
            }
            Region::SingleQuoted => {
                if c == '\'' {
                    region = Region::Code;
                }
                Region::SingleQuoted
            }
            Region::DoubleQuoted => {
                if c == '"' {
                    region = Region::Code;
                }
                Region::DoubleQuoted
            }
            Region::LineComment => {
                if c == '\n' {
                    region = Region::Code;
                }
                Region::LineComment
            }
        };
        out.push((c, tag));
    }

    out
}

/// Splits a statement into characters tagged with whether they are code.
fn scan(sql: &str) -> Vec<(char, bool)> {
    classify(sql)
        .into_iter()
        .map(|(c, region)| (c, region == Region::Code))
        .collect()
}

/// Returns the statement with every non-code character blanked out.
fn code_only(sql: &str) -> String {
    scan(sql)
        .into_iter()
        .map(|(c, is_code)| if is_code { c } else { ' ' })
        .collect()
}

/// Returns true if `keyword` appears as a whole word in statement code.
fn contains_keyword(sql: &str, keyword: &str) -> bool {
    code_only(sql)
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|word| word.eq_ignore_ascii_case(keyword))
}

/// Returns the statement without trailing whitespace, terminators, or
/// line comments, so that a clause can be appended to it.
fn statement_body(sql: &str) -> &str {
    let mut end: usize = 0;
    for ((offset, c), (_, region)) in sql.char_indices().zip(classify(sql)) {
        let trailing: bool = match region {
            Region::LineComment => true,
            Region::Code => c.is_whitespace() || c == ';',
            Region::SingleQuoted | Region::DoubleQuoted => false,
        };
        if !trailing {
            end = offset + c.len_utf8();
        }
    }
    &sql[..end]
}

/// Counts the placeholders in a statement.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    scan(sql)
        .into_iter()
        .filter(|&(c, is_code)| is_code && c == PLACEHOLDER)
        .count()
}

/// Rewrites generic `?` placeholders into the syntax required by `kind`.
///
/// # Arguments
///
/// * `sql` - A statement using `?` placeholders
/// * `kind` - The backend the statement will run on
#[must_use]
pub fn translate_placeholders(sql: &str, kind: BackendKind) -> String {
    match kind {
        BackendKind::Sqlite => sql.to_string(),
        BackendKind::Postgres => {
            let mut out: String = String::with_capacity(sql.len() + 8);
            let mut next: usize = 1;
            for (c, is_code) in scan(sql) {
                if is_code && c == PLACEHOLDER {
                    out.push('$');
                    out.push_str(&next.to_string());
                    next += 1;
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}

/// Returns true if the statement is an `INSERT`.
///
/// A statement led by a `WITH` clause counts when it contains an `INSERT`.
#[must_use]
pub fn is_insert(sql: &str) -> bool {
    let code: String = code_only(sql);
    match code.split_whitespace().next() {
        Some(word) if word.eq_ignore_ascii_case("INSERT") => true,
        Some(word) if word.eq_ignore_ascii_case("WITH") => contains_keyword(sql, "INSERT"),
        _ => false,
    }
}

/// Appends `RETURNING id` to an `INSERT` that does not already return rows.
///
/// Statements that are not inserts, or that already carry a `RETURNING`
/// clause, are returned unchanged. A trailing terminator or line comment is
/// dropped so the clause stays in statement code.
#[must_use]
pub fn with_returning_id(sql: &str) -> Cow<'_, str> {
    if !is_insert(sql) || contains_keyword(sql, "RETURNING") {
        return Cow::Borrowed(sql);
    }
    Cow::Owned(format!("{} RETURNING id", statement_body(sql)))
}

/// Restricts a query to its first row by appending `LIMIT 1`.
///
/// Queries that already carry a `LIMIT` clause are returned unchanged.
#[must_use]
pub fn with_single_row_limit(sql: &str) -> Cow<'_, str> {
    if contains_keyword(sql, "LIMIT") {
        return Cow::Borrowed(sql);
    }
    Cow::Owned(format!("{} LIMIT 1", statement_body(sql)))
}
