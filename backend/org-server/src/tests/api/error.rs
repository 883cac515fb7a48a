use crate::ApiError;

use org_core::CoreError;
use org_db::DbError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;
use uuid::Uuid;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Employee not found".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Employee not found");
    assert!(json["error"].get("field").is_none());
    assert!(json["error"].get("chain").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "Name is required".into(),
        field: Some("name".into()),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn test_cycle_detected_returns_422_with_chain() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let error = ApiError::CycleDetected {
        message: "loop".into(),
        chain: vec![a, b, a],
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CYCLE_DETECTED");
    let chain = json["error"]["chain"].as_array().unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0], a.to_string());
    assert_eq!(chain[1], b.to_string());
    assert_eq!(chain[2], a.to_string());
}

#[tokio::test]
async fn test_unknown_reference_returns_422() {
    let error = ApiError::UnknownReference {
        message: "not a member".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "UNKNOWN_REFERENCE");
}

#[tokio::test]
async fn test_conflict_error_returns_409_with_version() {
    let error = ApiError::Conflict {
        message: "Version mismatch".into(),
        current_version: 5,
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["current_version"], 5);
    assert!(json["error"]["message"].as_str().unwrap().contains("5"));
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: here(),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_cycle_from_core_error_keeps_chain() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let error: ApiError = CoreError::CycleDetected {
        chain: vec![a, b, a],
        location: here(),
    }
    .into();

    match error {
        ApiError::CycleDetected { chain, .. } => assert_eq!(chain, vec![a, b, a]),
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[test]
fn test_inconsistent_entry_from_core_error_is_validation() {
    let error: ApiError = CoreError::InconsistentEntry {
        employee_id: Uuid::new_v4(),
        stated_superior: None,
        claimed_by: Uuid::new_v4(),
        location: here(),
    }
    .into();

    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref f), .. } if f == "hierarchy"
    ));
}

#[test]
fn test_conflicting_write_from_core_error_is_conflict() {
    let error: ApiError = CoreError::ConflictingWrite {
        current_version: 7,
        location: here(),
    }
    .into();

    assert!(matches!(
        error,
        ApiError::Conflict {
            current_version: 7,
            ..
        }
    ));
}

#[test]
fn test_store_error_from_core_error_is_internal_and_hides_details() {
    let error: ApiError = CoreError::Store {
        message: "disk I/O error at /var/db".into(),
        location: here(),
    }
    .into();

    match error {
        ApiError::Internal { message, .. } => assert!(!message.contains("/var/db")),
        other => panic!("expected Internal, got {other:?}"),
    }
}

#[test]
fn test_duplicate_from_db_error_is_email_validation() {
    let error: ApiError = DbError::Duplicate {
        message: "UNIQUE constraint failed: org_employees.email".into(),
        location: here(),
    }
    .into();

    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref f), .. } if f == "email"
    ));
}

#[test]
fn test_db_not_found_is_not_found() {
    let error: ApiError = DbError::NotFound {
        message: "Department x not found".into(),
        location: here(),
    }
    .into();

    assert!(matches!(error, ApiError::NotFound { .. }));
}

#[test]
fn test_invalid_uuid_is_validation() {
    let error: ApiError = Uuid::parse_str("not-a-uuid").unwrap_err().into();

    assert!(matches!(error, ApiError::Validation { field: None, .. }));
}
