//! Employee REST API handlers

use crate::{
    ApiError, ApiResult, AppState, CreateEmployeeRequest, DeleteResponse,
    DepartmentHierarchyViewDto, EmployeeDetailsResponse, EmployeeDto, EmployeeListResponse,
    EmployeeResponse, UpdateEmployeeRequest, parse_id_set, require_text,
};

use org_core::Employee;
use org_db::EmployeeRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

/// GET /api/v1/employees
pub async fn list_employees(
    State(state): State<AppState>,
) -> ApiResult<Json<EmployeeListResponse>> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let employees = repo.find_all().await?;

    Ok(Json(EmployeeListResponse {
        employees: employees.into_iter().map(EmployeeDto::from).collect(),
    }))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee_id = Uuid::parse_str(&id)?;

    let repo = EmployeeRepository::new(state.pool.clone());
    let employee = repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Employee {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(EmployeeResponse {
        employee: employee.into(),
    }))
}

/// GET /api/v1/employees/{id}/details
///
/// Employee plus their superior and direct subordinates in every
/// department they belong to
pub async fn get_employee_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeDetailsResponse>> {
    let employee_id = Uuid::parse_str(&id)?;

    let repo = EmployeeRepository::new(state.pool.clone());
    let employee = repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Employee {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let views = state.hierarchy.get_employee_hierarchy_view(employee_id).await?;

    Ok(Json(EmployeeDetailsResponse {
        employee: employee.into(),
        hierarchy: views
            .into_iter()
            .map(DepartmentHierarchyViewDto::from)
            .collect(),
    }))
}

/// POST /api/v1/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    // 1. Validate input
    let name = require_text(&req.name, "name", "Name is required")?;
    let email = require_text(&req.email, "email", "Email is required")?;
    let departments = parse_id_set(&req.departments, "departments")?;
    if departments.is_empty() {
        return Err(ApiError::Validation {
            message: "At least one department is required".into(),
            field: Some("departments".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // 2. Save; department member sets are updated in the same transaction
    let employee = Employee::new(name, email, departments);
    let repo = EmployeeRepository::new(state.pool.clone());
    repo.create(&employee).await?;

    log::info!(
        "Created employee {} in {} department(s) via REST API",
        employee.id,
        employee.departments.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            employee: employee.into(),
        }),
    ))
}

/// PUT /api/v1/employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee_id = Uuid::parse_str(&id)?;

    // 1. Fetch existing employee
    let repo = EmployeeRepository::new(state.pool.clone());
    let mut employee = repo
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Employee {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    // 2. Apply provided fields
    if let Some(ref name) = req.name {
        employee.name = require_text(name, "name", "Name cannot be empty")?;
    }
    if let Some(ref email) = req.email {
        employee.email = require_text(email, "email", "Email cannot be empty")?;
    }
    if let Some(ref departments) = req.departments {
        let departments = parse_id_set(departments, "departments")?;
        if departments.is_empty() {
            return Err(ApiError::Validation {
                message: "At least one department is required".into(),
                field: Some("departments".into()),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        employee.departments = departments;
    } else if let Some(ref department) = req.department {
        let departments = parse_id_set(std::slice::from_ref(department), "department")?;
        if !departments.is_empty() {
            employee.departments = departments;
        }
    }
    employee.updated_at = Utc::now();

    // 3. Save, reconciling department member sets and hierarchies
    let delta = repo.update(&employee).await?;

    log::info!(
        "Updated employee {} via REST API (+{} / -{} departments)",
        employee.id,
        delta.added.len(),
        delta.removed.len()
    );

    Ok(Json(EmployeeResponse {
        employee: employee.into(),
    }))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let employee_id = Uuid::parse_str(&id)?;

    let repo = EmployeeRepository::new(state.pool.clone());
    if !repo.delete(employee_id).await? {
        return Err(ApiError::NotFound {
            message: format!("Employee {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::info!("Deleted employee {} via REST API", employee_id);

    Ok(Json(DeleteResponse {
        deleted_id: employee_id.to_string(),
    }))
}
