use crate::{
    AppState, assign_superior, create_department, create_employee, delete_department,
    delete_employee, get_department, get_department_tree, get_employee, get_employee_details,
    health, list_departments, list_employees, replace_hierarchy, update_department,
    update_employee,
};

use std::time::Duration;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, put},
};
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Employees
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .route("/employees/{id}/details", get(get_employee_details))
        // Departments
        .route("/departments", get(list_departments).post(create_department))
        .route(
            "/departments/{id}",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
        .route("/departments/{id}/tree", get(get_department_tree))
        .route("/departments/{id}/hierarchy", put(replace_hierarchy))
        .route(
            "/departments/{id}/hierarchy/{employee_id}",
            put(assign_superior),
        );

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .nest("/api/v1", api)
        // Add shared state
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|_: BoxError| async {
                    StatusCode::REQUEST_TIMEOUT
                }))
                .timeout(REQUEST_TIMEOUT),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
