// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for poemboard.
//!
//! A [`Poem`] owns zero or more [`Comment`]s. Poems are written by the
//! administrator; comments are public submissions. The types in this crate
//! carry no persistence concerns: validated inputs ([`NewPoem`],
//! [`PoemEdit`], [`NewComment`]) are constructed here and handed to the
//! persistence layer, which returns stored [`Poem`] and [`Comment`] values.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{Comment, CommentId, NewComment, NewPoem, Poem, PoemEdit, PoemId};
pub use validation::{normalize_email, validate_poem_id, validate_required};
