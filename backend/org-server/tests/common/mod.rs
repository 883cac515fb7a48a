#![allow(dead_code)]

//! Test infrastructure for org-server API tests

use org_core::MembershipPolicy;
use org_server::{AppState, build_router};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// AppState over a fresh in-memory database
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with(MembershipPolicy::default()).await
}

pub async fn create_test_app_state_with(policy: MembershipPolicy) -> AppState {
    let pool = org_db::open_in_memory_pool()
        .await
        .expect("Failed to create test database");
    AppState::new(pool, policy)
}

/// Send one request through a fresh router and decode the JSON body
pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = build_router(state.clone());

    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // axum's own extractor rejections are plain text
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

/// Create an empty department, returning its id
pub async fn create_test_department(state: &AppState, name: &str) -> String {
    let (status, json) = send(
        state,
        "POST",
        "/api/v1/departments",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["department"]["id"].as_str().unwrap().to_string()
}

/// Create an employee in one department, returning their id
pub async fn create_test_employee(state: &AppState, name: &str, department_id: &str) -> String {
    let (status, json) = send(
        state,
        "POST",
        "/api/v1/employees",
        Some(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "departments": [department_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["employee"]["id"].as_str().unwrap().to_string()
}

/// Department holding Alice, Bob, Carol and Dave arranged as
/// `{alice: null, bob: alice, carol: alice, dave: bob}`
pub async fn seed_hierarchy(state: &AppState) -> (String, [String; 4]) {
    let department = create_test_department(state, "Engineering").await;
    let alice = create_test_employee(state, "Alice", &department).await;
    let bob = create_test_employee(state, "Bob", &department).await;
    let carol = create_test_employee(state, "Carol", &department).await;
    let dave = create_test_employee(state, "Dave", &department).await;

    let (status, json) = send(
        state,
        "PUT",
        &format!("/api/v1/departments/{department}/hierarchy"),
        Some(json!({
            "hierarchy": {
                alice.clone(): null,
                bob.clone(): alice.clone(),
                carol.clone(): alice.clone(),
                dave.clone(): bob.clone(),
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");

    (department, [alice, bob, carol, dave])
}
