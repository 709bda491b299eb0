// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use poemboard_persistence::Persistence;

use crate::{AdminCredential, AuthenticatedAdmin, CreatePoemRequest, create_poem};

/// The shared secret used by every test credential.
pub const TEST_SECRET: &str = "azul profundo";

/// Lowest cost bcrypt accepts, to keep tests fast.
pub const TEST_COST: u32 = 4;

pub fn create_test_credential() -> AdminCredential {
    AdminCredential::new(TEST_SECRET, TEST_COST).unwrap()
}

pub fn create_test_admin() -> AuthenticatedAdmin {
    create_test_credential().authenticate(TEST_SECRET).unwrap()
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_poem_request(title: &str) -> CreatePoemRequest {
    CreatePoemRequest {
        title: title.to_string(),
        content: String::from("<p>Verde que te quiero verde.</p>"),
    }
}

/// Creates a poem through the API and returns its id.
pub fn seed_poem(persistence: &mut Persistence, title: &str) -> i64 {
    let admin = create_test_admin();
    create_poem(persistence, &admin, &create_poem_request(title))
        .unwrap()
        .id
}
