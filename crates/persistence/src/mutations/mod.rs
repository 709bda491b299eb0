// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutations.
//!
//! Multi-statement operations (the poem cascade delete and the comment
//! uniqueness guard) run inside a single backend transaction, so concurrent
//! readers never observe a half-applied operation.

pub mod comments;
pub mod poems;
