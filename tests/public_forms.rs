//! Public form access and submission tests.

mod common;

use axum::http::StatusCode;
use common::{auth_header, create_form, publish_form, test_server};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_published_form_is_publicly_visible() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(
        &server,
        owner,
        json!({
            "title": "Survey",
            "fields": [{"type": "text", "label": "Name", "name": "name"}],
        }),
    )
    .await;
    let id = data["id"].as_str().expect("id");
    let slug = data["slug"].as_str().expect("slug");

    publish_form(&server, owner, id).await;

    let response = server.get(&format!("/public/forms/{slug}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["title"], json!("Survey"));
    assert_eq!(body["data"]["fields"][0]["name"], json!("name"));
    assert!(body["data"].get("owner_id").is_none());
}

#[tokio::test]
async fn test_draft_and_unknown_slugs_are_indistinguishable() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(&server, owner, json!({"title": "Hidden"})).await;
    let slug = data["slug"].as_str().expect("slug");

    let draft = server.get(&format!("/public/forms/{slug}")).await;
    let unknown = server.get("/public/forms/no-such-form-aaaaaa").await;

    assert_eq!(draft.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(draft.json::<Value>(), unknown.json::<Value>());
}

#[tokio::test]
async fn test_unpublishing_hides_the_form_again() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(&server, owner, json!({"title": "Survey"})).await;
    let id = data["id"].as_str().expect("id");
    let slug = data["slug"].as_str().expect("slug");

    publish_form(&server, owner, id).await;
    assert_eq!(
        server.get(&format!("/public/forms/{slug}")).await.status_code(),
        StatusCode::OK
    );

    let (name, value) = auth_header(owner);
    let response = server
        .put(&format!("/forms/{id}"))
        .add_header(name, value)
        .json(&json!({"status": "draft"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    assert_eq!(
        server.get(&format!("/public/forms/{slug}")).await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_submissions_are_stored_verbatim_in_arrival_order() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(
        &server,
        owner,
        json!({
            "title": "Survey",
            "fields": [{"type": "text", "label": "Name", "name": "name"}],
        }),
    )
    .await;
    let id = data["id"].as_str().expect("id");
    let slug = data["slug"].as_str().expect("slug");
    publish_form(&server, owner, id).await;

    let first = json!({"name": "Ada", "note": "unvalidated extras survive"});
    let second = json!({"name": "Grace"});
    for payload in [&first, &second] {
        let response = server
            .post(&format!("/public/forms/{slug}/submit"))
            .json(&json!({"data": payload}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["data"]["data"], *payload);
    }

    let (name, value) = auth_header(owner);
    let body = server
        .get(&format!("/forms/{id}/submissions"))
        .add_header(name, value)
        .await
        .json::<Value>();
    let stored: Vec<Value> = body["data"]
        .as_array()
        .expect("submissions")
        .iter()
        .map(|s| s["data"].clone())
        .collect();
    assert_eq!(stored, vec![first, second]);
}

#[tokio::test]
async fn test_submitting_to_draft_or_unknown_form_is_not_found() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(&server, owner, json!({"title": "Hidden"})).await;
    let slug = data["slug"].as_str().expect("slug");

    let response = server
        .post(&format!("/public/forms/{slug}/submit"))
        .json(&json!({"data": {"name": "Ada"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .post("/public/forms/no-such-form-aaaaaa/submit")
        .json(&json!({"data": {"name": "Ada"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submission_requires_a_data_object() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(&server, owner, json!({"title": "Survey"})).await;
    let id = data["id"].as_str().expect("id");
    let slug = data["slug"].as_str().expect("slug");
    publish_form(&server, owner, id).await;

    for (payload, expected) in [
        (json!({}), "data is required"),
        (json!({"data": null}), "data is required"),
        (json!({"data": {}}), "data is required"),
        (json!({"data": "plain string"}), "data must be an object"),
    ] {
        let response = server
            .post(&format!("/public/forms/{slug}/submit"))
            .json(&payload)
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"]["data"], json!([expected]), "payload: {payload}");
    }

    // nothing was stored
    let (name, value) = auth_header(owner);
    let body = server
        .get(&format!("/forms/{id}/submissions"))
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_deleting_a_form_drops_its_public_slug() {
    let server = test_server();
    let owner = Uuid::new_v4();
    let data = create_form(&server, owner, json!({"title": "Survey"})).await;
    let id = data["id"].as_str().expect("id");
    let slug = data["slug"].as_str().expect("slug");
    publish_form(&server, owner, id).await;

    let (name, value) = auth_header(owner);
    let response = server.delete(&format!("/forms/{id}")).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert_eq!(
        server.get(&format!("/public/forms/{slug}")).await.status_code(),
        StatusCode::NOT_FOUND
    );
}
