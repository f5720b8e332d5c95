use axum::http::StatusCode;
use axum_test::TestServer;
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use schooltime_db::mock::local::LocalRepository;
use serde_json::{Value, json};

use crate::test_utils::{officer, test_server};

async fn post(server: &TestServer, path: &str, body: Value) -> (StatusCode, Value) {
    let (name, value) = officer();
    let response = server.post(path).add_header(name, value).json(&body).await;
    (response.status_code(), response.json::<Value>())
}

async fn get(server: &TestServer, path: &str) -> (StatusCode, Value) {
    let (name, value) = officer();
    let response = server.get(path).add_header(name, value).await;
    (response.status_code(), response.json::<Value>())
}

/// A store holding nothing but one subject.
async fn empty_school() -> TestServer {
    let repo = LocalRepository::new();
    repo.insert_subject(10, "Mathematics", "MATH").await;
    test_server(repo)
}

#[tokio::test]
async fn test_created_class_staff_and_room_can_be_timetabled() {
    let server = empty_school().await;
    let teacher_name: String = Name().fake();

    let (class_status, class) = post(
        &server,
        "/api/v1/classes",
        json!({ "name": "Grade 9", "level": "Secondary" }),
    )
    .await;
    let (staff_status, teacher) =
        post(&server, "/api/v1/staff", json!({ "fullName": teacher_name })).await;
    let (room_status, room) = post(&server, "/api/v1/rooms", json!({ "name": "Room 12" })).await;

    assert_eq!(class_status, StatusCode::CREATED);
    assert_eq!(staff_status, StatusCode::CREATED);
    assert_eq!(room_status, StatusCode::CREATED);
    assert_eq!(class["data"]["level"], json!("Secondary"));

    let class_id = class["data"]["id"].clone();
    let (status, _) = post(
        &server,
        "/api/v1/timetable/slots",
        json!({
            "classId": class_id,
            "dayOfWeek": 1,
            "period": 1,
            "subjectId": 10,
            "teacherId": teacher["data"]["id"],
            "roomId": room["data"]["id"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, timetable) = get(
        &server,
        &format!("/api/v1/timetable?classId={}", class_id.as_i64().unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let slot = &timetable["data"]["slots"][0];
    assert_eq!(slot["teacher"]["fullName"], json!(teacher_name));
    assert_eq!(slot["room"]["name"], json!("Room 12"));
}

#[tokio::test]
async fn test_lists_are_newest_first() {
    let server = empty_school().await;

    post(&server, "/api/v1/classes", json!({ "name": "Grade 1" })).await;
    post(&server, "/api/v1/classes", json!({ "name": "Grade 2" })).await;
    post(&server, "/api/v1/rooms", json!({ "name": "Hall" })).await;

    let (status, classes) = get(&server, "/api/v1/classes").await;
    let (_, rooms) = get(&server, "/api/v1/rooms").await;
    let (_, staff) = get(&server, "/api/v1/staff").await;

    assert_eq!(status, StatusCode::OK);
    let names = classes["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|class| class["name"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Grade 2", "Grade 1"]);
    assert_eq!(rooms["data"][0]["name"], json!("Hall"));
    assert_eq!(staff["data"], json!([]));
}

#[tokio::test]
async fn test_names_are_required() {
    let server = empty_school().await;

    let (class_status, class) = post(&server, "/api/v1/classes", json!({ "name": " " })).await;
    let (staff_status, staff) = post(&server, "/api/v1/staff", json!({ "fullName": "" })).await;
    let (room_status, _) = post(&server, "/api/v1/rooms", json!({})).await;

    assert_eq!(class_status, StatusCode::BAD_REQUEST);
    assert_eq!(class["issues"], json!(["name: must not be empty"]));
    assert_eq!(staff_status, StatusCode::BAD_REQUEST);
    assert_eq!(staff["issues"], json!(["fullName: must not be empty"]));
    assert_eq!(room_status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_roster_requires_a_token() {
    let server = empty_school().await;

    let response = server
        .post("/api/v1/classes")
        .json(&json!({ "name": "Grade 9" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
