// Copyright (C) 2026 The poemboard Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_poem_request, create_test_admin, create_test_persistence, seed_poem};
use crate::{
    ApiError, CreateCommentRequest, CreatePoemRequest, EditPoemRequest, SuccessResponse,
    create_comment, create_poem, delete_comment, delete_poem, edit_poem, get_poem_with_comments,
    list_poems,
};

#[test]
fn test_created_poem_resolves_and_is_listed() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();

    let created = create_poem(&mut persistence, &admin, &create_poem_request("Dusk")).unwrap();
    assert_eq!(created.message, "success");
    assert_eq!(created.id, 1);

    let fetched = get_poem_with_comments(&mut persistence, created.id).unwrap();
    assert_eq!(fetched.data.poem.title, "Dusk");
    assert!(fetched.data.comments.is_empty());

    let listed = list_poems(&mut persistence).unwrap();
    assert_eq!(listed.message, "success");
    assert!(listed.data.iter().any(|p| p.id == created.id));
}

#[test]
fn test_list_poems_newest_first() {
    let mut persistence = create_test_persistence();
    let older = seed_poem(&mut persistence, "Older");
    let newer = seed_poem(&mut persistence, "Newer");

    let ids: Vec<i64> = list_poems(&mut persistence)
        .unwrap()
        .data
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, vec![newer, older]);
}

#[test]
fn test_create_poem_requires_title_and_content() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();

    let blank_title = CreatePoemRequest {
        title: String::from("  "),
        content: String::from("Body"),
    };
    let result = create_poem(&mut persistence, &admin, &blank_title);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "title"));

    let blank_content = CreatePoemRequest {
        title: String::from("Title"),
        content: String::new(),
    };
    let result = create_poem(&mut persistence, &admin, &blank_content);
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "content"));

    assert!(list_poems(&mut persistence).unwrap().data.is_empty());
}

#[test]
fn test_get_unknown_poem_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = get_poem_with_comments(&mut persistence, 5);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_edit_poem_updates_fields() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();
    let poem_id = seed_poem(&mut persistence, "Draft");

    let request = EditPoemRequest {
        id: poem_id,
        title: String::from("Final"),
        content: String::from("Revised"),
    };
    assert_eq!(
        edit_poem(&mut persistence, &admin, &request).unwrap(),
        SuccessResponse::ok()
    );

    let poem = get_poem_with_comments(&mut persistence, poem_id).unwrap().data.poem;
    assert_eq!(poem.title, "Final");
    assert_eq!(poem.content, "Revised");
}

#[test]
fn test_edit_unknown_poem_is_not_found() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();

    let request = EditPoemRequest {
        id: 9,
        title: String::from("Ghost"),
        content: String::from("Nothing"),
    };
    let result = edit_poem(&mut persistence, &admin, &request);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_poem_cascades_to_comments() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();
    let poem_id = seed_poem(&mut persistence, "Doomed");
    create_comment(
        &mut persistence,
        &CreateCommentRequest {
            poem_id,
            author: String::from("A"),
            email: Some(String::from("a@x.com")),
            content: String::from("nice"),
        },
    )
    .unwrap();

    delete_poem(&mut persistence, &admin, poem_id).unwrap();

    assert!(matches!(
        get_poem_with_comments(&mut persistence, poem_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(persistence.list_comments(poem_id).unwrap().is_empty());
}

#[test]
fn test_delete_unknown_poem_succeeds() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();

    assert_eq!(
        delete_poem(&mut persistence, &admin, 42).unwrap(),
        SuccessResponse::ok()
    );
}

#[test]
fn test_delete_comment_removes_it_from_poem() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin();
    let poem_id = seed_poem(&mut persistence, "Poem");
    let created = create_comment(
        &mut persistence,
        &CreateCommentRequest {
            poem_id,
            author: String::from("A"),
            email: None,
            content: String::from("hello"),
        },
    )
    .unwrap();

    delete_comment(&mut persistence, &admin, created.id).unwrap();

    let fetched = get_poem_with_comments(&mut persistence, poem_id).unwrap();
    assert!(fetched.data.comments.is_empty());
}

#[test]
fn test_get_poem_serializes_flattened() {
    let mut persistence = create_test_persistence();
    let poem_id = seed_poem(&mut persistence, "Flat");

    let response = get_poem_with_comments(&mut persistence, poem_id).unwrap();
    let json: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(json["message"], "success");
    assert_eq!(json["data"]["id"], poem_id);
    assert_eq!(json["data"]["title"], "Flat");
    assert!(json["data"]["created_at"].is_string());
    assert!(json["data"]["comments"].as_array().unwrap().is_empty());
}
