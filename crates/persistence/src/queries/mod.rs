// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic read queries.
//!
//! Every function here is generic over [`crate::backend::PersistenceBackend`]
//! and written with `?` placeholders. Ordering is always explicit: rows are
//! returned newest first, with the identifier breaking ties between rows
//! created in the same second.

pub mod comments;
pub mod poems;
