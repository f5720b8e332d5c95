use axum::http::StatusCode;
use axum_test::TestServer;
use fake::{Fake, faker::lorem::en::Word};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{officer, seeded_repository, test_server};

async fn server() -> TestServer {
    test_server(seeded_repository().await)
}

async fn create(server: &TestServer, body: Value) -> (StatusCode, Value) {
    let (name, value) = officer();
    let response = server
        .post("/api/v1/subjects")
        .add_header(name, value)
        .json(&body)
        .await;
    (response.status_code(), response.json::<Value>())
}

#[tokio::test]
async fn test_create_and_list_newest_first() {
    let server = server().await;
    let name: String = Word().fake();

    let (status, created) = create(
        &server,
        json!({ "name": name, "code": "BIO", "department": "Science" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], json!(name));
    assert_eq!(created["data"]["department"], json!("Science"));

    let (header, value) = officer();
    let response = server.get("/api/v1/subjects").add_header(header, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let codes = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|subject| subject["code"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(codes, vec!["BIO", "ENG", "MATH"]);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let server = server().await;

    let (status, body) = create(&server, json!({ "name": "Further Maths", "code": "MATH" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Subject code already exists"));
}

#[tokio::test]
async fn test_blank_fields_are_rejected() {
    let server = server().await;

    let (status, body) = create(&server, json!({ "name": " ", "code": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["issues"],
        json!(["name: must not be empty", "code: must not be empty"])
    );
}

#[tokio::test]
async fn test_update_keeps_absent_fields() {
    let server = server().await;
    let (name, value) = officer();

    let response = server
        .put("/api/v1/subjects/11")
        .add_header(name, value)
        .json(&json!({ "department": "Languages" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["name"], json!("English"));
    assert_eq!(body["data"]["code"], json!("ENG"));
    assert_eq!(body["data"]["department"], json!("Languages"));
}

#[tokio::test]
async fn test_update_to_taken_code_conflicts() {
    let server = server().await;
    let (name, value) = officer();

    let response = server
        .put("/api/v1/subjects/11")
        .add_header(name, value)
        .json(&json!({ "code": "MATH" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_subject_is_not_found() {
    let server = server().await;
    let (name, value) = officer();

    let response = server
        .put("/api/v1/subjects/404")
        .add_header(name, value)
        .json(&json!({ "name": "Latin" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], json!("Subject not found"));
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let server = server().await;

    let (name, value) = officer();
    let deleted = server.delete("/api/v1/subjects/11").add_header(name, value).await;
    let (name, value) = officer();
    let again = server.delete("/api/v1/subjects/11").add_header(name, value).await;

    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subjects_require_a_token() {
    let server = server().await;

    let response = server.get("/api/v1/subjects").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
