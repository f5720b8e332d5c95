use axum::{
    body::to_bytes,
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::Response,
};
use chrono::Duration;
use pretty_assertions::assert_eq;
use rstest::rstest;
use schooltime_api::middleware::{auth, error_handling::map_error};
use schooltime_core::{
    errors::SchoolError,
    models::{
        auth::{ACADEMIC_ROLES, AuthUser, SUPER_ADMIN},
        timetable::{ConflictKind, SlotConflict, SlotDetail, SubjectSummary},
    },
};
use serde_json::{Value, json};

use crate::test_utils::{TEST_SECRET, signed_token};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(SchoolError::NotFound("Subject not found".into()), StatusCode::NOT_FOUND)]
#[case(SchoolError::Validation("classId is required".into()), StatusCode::BAD_REQUEST)]
#[case(SchoolError::InvalidRequest(vec!["period: must be at least 1".into()]), StatusCode::BAD_REQUEST)]
#[case(SchoolError::Conflict("Subject code already exists".into()), StatusCode::CONFLICT)]
#[case(SchoolError::SlotConflict(Vec::new()), StatusCode::CONFLICT)]
#[case(SchoolError::Authentication("Unauthorized".into()), StatusCode::UNAUTHORIZED)]
#[case(SchoolError::Authorization("Forbidden".into()), StatusCode::FORBIDDEN)]
#[case(SchoolError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status(#[case] error: SchoolError, #[case] status: StatusCode) {
    assert_eq!(map_error(error).status(), status);
}

#[tokio::test]
async fn test_error_handling_internal_hides_detail() {
    let error = SchoolError::Internal(Box::new(std::io::Error::other("disk on fire")));

    let body = body_json(map_error(error)).await;

    assert_eq!(body, json!({ "message": "Internal server error" }));
}

#[tokio::test]
async fn test_validation_body_lists_issues() {
    let error = SchoolError::InvalidRequest(vec![
        "dayOfWeek: must be between 1 and 7".into(),
        "period: must be at least 1".into(),
    ]);

    let body = body_json(map_error(error)).await;

    assert_eq!(
        body,
        json!({
            "message": "Validation failed",
            "issues": ["dayOfWeek: must be between 1 and 7", "period: must be at least 1"],
        })
    );
}

#[tokio::test]
async fn test_slot_conflict_body_lists_conflicts() {
    let conflict = SlotConflict {
        slot: SlotDetail {
            id: 7,
            timetable_id: 2,
            class_id: 5,
            term_id: 1,
            day_of_week: 1,
            period: 1,
            subject: SubjectSummary {
                id: 10,
                name: "Mathematics".into(),
                code: "MATH".into(),
            },
            teacher: None,
            room: None,
        },
        reasons: vec![ConflictKind::Class],
    };

    let body = body_json(map_error(SchoolError::SlotConflict(vec![conflict]))).await;

    assert_eq!(body["message"], json!("Slot conflict detected"));
    assert_eq!(body["conflicts"][0]["id"], json!(7));
    assert_eq!(body["conflicts"][0]["reasons"], json!(["class"]));
    assert_eq!(body["conflicts"][0]["teacher"], Value::Null);
}

#[rstest]
#[case(None)]
#[case(Some("Basic dXNlcjpwYXNz"))]
#[case(Some("Bearer "))]
fn test_bearer_token_rejects_malformed_headers(#[case] header: Option<&str>) {
    let mut headers = HeaderMap::new();
    if let Some(header) = header {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(header).unwrap());
    }

    assert!(matches!(
        auth::bearer_token(&headers),
        Err(SchoolError::Authentication(_))
    ));
}

#[test]
fn test_token_round_trip_yields_user() {
    let token = signed_token(&[SUPER_ADMIN], Duration::minutes(5));
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );

    let user = auth::authenticate(&headers, TEST_SECRET).unwrap();

    assert_eq!(user.id, 42);
    assert_eq!(user.roles, vec![SUPER_ADMIN.to_string()]);
    assert!(auth::authorize(&user, ACADEMIC_ROLES).is_ok());
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let token = signed_token(&[SUPER_ADMIN], Duration::minutes(5));

    let result = auth::verify_access_token(&token, "another-secret");

    assert!(matches!(result, Err(SchoolError::Authentication(_))));
}

#[test]
fn test_user_without_academic_role_is_forbidden() {
    let user = AuthUser {
        id: 1,
        email: "parent@school.test".into(),
        roles: vec!["Parent".into()],
    };

    assert!(matches!(
        auth::authorize(&user, ACADEMIC_ROLES),
        Err(SchoolError::Authorization(_))
    ));
}

#[test]
fn test_expiry_is_checked() {
    let token = signed_token(&[SUPER_ADMIN], Duration::hours(-1));

    assert!(auth::verify_access_token(&token, TEST_SECRET).is_err());
}
