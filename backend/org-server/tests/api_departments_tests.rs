//! Integration tests for department API handlers
mod common;

use crate::common::{
    create_test_app_state, create_test_app_state_with, create_test_department,
    create_test_employee, seed_hierarchy, send,
};

use org_core::MembershipPolicy;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_list_departments_returns_all() {
    let state = create_test_app_state().await;
    create_test_department(&state, "Engineering").await;
    create_test_department(&state, "Sales").await;

    let (status, json) = send(&state, "GET", "/api/v1/departments", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["departments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_department_defaults() {
    let state = create_test_app_state().await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({ "name": " Research ", "description": "Labs" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let department = &json["department"];
    assert_eq!(department["name"], "Research");
    assert_eq!(department["description"], "Labs");
    assert_eq!(department["version"], 1);
    assert_eq!(department["members"].as_array().unwrap().len(), 0);
    assert_eq!(department["hierarchy"], json!({}));
}

#[tokio::test]
async fn test_create_department_blank_name_rejected() {
    let state = create_test_app_state().await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({ "name": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn test_create_department_with_members_and_hierarchy() {
    let state = create_test_app_state().await;
    let home = create_test_department(&state, "Home").await;
    let alice = create_test_employee(&state, "Alice", &home).await;
    let bob = create_test_employee(&state, "Bob", &home).await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({
            "name": "Platform",
            "members": [alice, bob],
            "hierarchy": { alice.clone(): { "superior": null, "subordinates": [bob] } },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    let department = &json["department"];
    assert_eq!(department["hierarchy"][&bob], alice);
    assert!(department["hierarchy"][&alice].is_null());

    // Members see the new department in their own records
    let (_, employee) = send(&state, "GET", &format!("/api/v1/employees/{bob}"), None).await;
    assert_eq!(employee["employee"]["departments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_department_with_cycle_rejected_and_not_saved() {
    let state = create_test_app_state().await;
    let home = create_test_department(&state, "Home").await;
    let alice = create_test_employee(&state, "Alice", &home).await;
    let bob = create_test_employee(&state, "Bob", &home).await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({
            "name": "Loop",
            "members": [alice, bob],
            "hierarchy": { alice.clone(): bob.clone(), bob.clone(): alice.clone() },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "CYCLE_DETECTED");
    let chain = json["error"]["chain"].as_array().unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.first(), chain.last());

    let (_, list) = send(&state, "GET", "/api/v1/departments", None).await;
    assert_eq!(list["departments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_department_enrolls_hierarchy_only_employees() {
    let state = create_test_app_state().await;
    let home = create_test_department(&state, "Home").await;
    let alice = create_test_employee(&state, "Alice", &home).await;
    let bob = create_test_employee(&state, "Bob", &home).await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({
            "name": "Platform",
            "members": [alice],
            "hierarchy": { bob.clone(): alice.clone() },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    let members = json["department"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m == &bob));
}

#[tokio::test]
async fn test_create_department_strict_policy_rejects_non_member() {
    let state = create_test_app_state_with(MembershipPolicy::Strict).await;
    let home = create_test_department(&state, "Home").await;
    let alice = create_test_employee(&state, "Alice", &home).await;
    let bob = create_test_employee(&state, "Bob", &home).await;

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({
            "name": "Platform",
            "members": [alice],
            "hierarchy": { bob.clone(): alice.clone() },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "UNKNOWN_REFERENCE");
}

#[tokio::test]
async fn test_create_department_hierarchy_with_unknown_employee_rejected() {
    let state = create_test_app_state().await;
    let ghost = Uuid::new_v4().to_string();

    let (status, json) = send(
        &state,
        "POST",
        "/api/v1/departments",
        Some(json!({ "name": "Platform", "hierarchy": { ghost: null } })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "UNKNOWN_REFERENCE");
}

#[tokio::test]
async fn test_get_department_not_found() {
    let state = create_test_app_state().await;

    let (status, json) = send(
        &state,
        "GET",
        &format!("/api/v1/departments/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_department_name_bumps_version() {
    let state = create_test_app_state().await;
    let department = create_test_department(&state, "Engineering").await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{department}"),
        Some(json!({ "name": "Platform Engineering", "expected_version": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["department"]["name"], "Platform Engineering");
    assert_eq!(json["department"]["version"], 2);
}

#[tokio::test]
async fn test_update_department_stale_version_conflict() {
    let state = create_test_app_state().await;
    let department = create_test_department(&state, "Engineering").await;
    create_test_employee(&state, "Ada", &department).await;

    // Adding Ada bumped the department past version 1
    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{department}"),
        Some(json!({ "name": "Renamed", "expected_version": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["current_version"], 2);
}

#[tokio::test]
async fn test_update_department_removing_member_prunes_hierarchy() {
    let state = create_test_app_state().await;
    let (engineering, [alice, bob, carol, dave]) = seed_hierarchy(&state).await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{engineering}"),
        Some(json!({ "members": [alice, carol, dave] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    let hierarchy = &json["department"]["hierarchy"];
    assert!(hierarchy.get(&bob).is_none());
    assert!(hierarchy[&dave].is_null());
    assert_eq!(hierarchy[&carol], alice);

    // Bob no longer lists the department
    let (_, employee) = send(&state, "GET", &format!("/api/v1/employees/{bob}"), None).await;
    assert_eq!(employee["employee"]["departments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_department_members_only_adds_and_bumps_version() {
    let state = create_test_app_state().await;
    let (engineering, [alice, bob, carol, dave]) = seed_hierarchy(&state).await;
    let sales = create_test_department(&state, "Sales").await;
    let erin = create_test_employee(&state, "Erin", &sales).await;
    let (_, before) = send(&state, "GET", &format!("/api/v1/departments/{engineering}"), None).await;
    let version = before["department"]["version"].as_i64().unwrap();

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{engineering}"),
        Some(json!({
            "members": [alice, bob, carol, dave, erin],
            "expected_version": version,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["department"]["version"], version + 1);
    assert_eq!(json["department"]["members"].as_array().unwrap().len(), 5);
    assert_eq!(json["department"]["hierarchy"][&dave], bob);

    // Erin now lists both departments
    let (_, employee) = send(&state, "GET", &format!("/api/v1/employees/{erin}"), None).await;
    assert_eq!(employee["employee"]["departments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_department_members_only_stale_version_conflict() {
    let state = create_test_app_state().await;
    let (engineering, [alice, ..]) = seed_hierarchy(&state).await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{engineering}"),
        Some(json!({ "members": [alice], "expected_version": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");

    let (_, json) = send(&state, "GET", &format!("/api/v1/departments/{engineering}"), None).await;
    assert_eq!(json["department"]["members"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_department_members_only_unknown_employee_not_saved() {
    let state = create_test_app_state().await;
    let (engineering, [alice, bob, carol, dave]) = seed_hierarchy(&state).await;
    let ghost = Uuid::new_v4().to_string();

    let (status, _) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{engineering}"),
        Some(json!({ "members": [alice, bob, carol, dave, ghost] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, json) = send(&state, "GET", &format!("/api/v1/departments/{engineering}"), None).await;
    assert_eq!(json["department"]["members"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_department_hierarchy_with_cycle_rejected() {
    let state = create_test_app_state().await;
    let (engineering, [alice, bob, carol, dave]) = seed_hierarchy(&state).await;

    let (status, json) = send(
        &state,
        "PUT",
        &format!("/api/v1/departments/{engineering}"),
        Some(json!({
            "hierarchy": {
                alice.clone(): dave.clone(),
                bob.clone(): alice.clone(),
                carol.clone(): alice.clone(),
                dave.clone(): bob.clone(),
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "CYCLE_DETECTED");

    // Stored hierarchy is untouched
    let (_, json) = send(&state, "GET", &format!("/api/v1/departments/{engineering}"), None).await;
    assert!(json["department"]["hierarchy"][&alice].is_null());
}

#[tokio::test]
async fn test_delete_department_removes_cross_references() {
    let state = create_test_app_state().await;
    let (engineering, [alice, _, _, _]) = seed_hierarchy(&state).await;

    let (status, json) = send(
        &state,
        "DELETE",
        &format!("/api/v1/departments/{engineering}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted_id"], engineering);

    let (_, employee) = send(&state, "GET", &format!("/api/v1/employees/{alice}"), None).await;
    assert_eq!(employee["employee"]["departments"].as_array().unwrap().len(), 0);

    let (status, _) = send(
        &state,
        "GET",
        &format!("/api/v1/departments/{engineering}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_department_not_found() {
    let state = create_test_app_state().await;

    let (status, _) = send(
        &state,
        "DELETE",
        &format!("/api/v1/departments/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_database() {
    let state = create_test_app_state().await;

    let (status, json) = send(&state, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["components"]["database"], "operational");
}
