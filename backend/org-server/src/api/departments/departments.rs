//! Department REST API handlers
//!
//! Hierarchy writes go through `HierarchyService`, so cycle and membership
//! checks finish before anything is saved.

use crate::{
    ApiError, ApiResult, AppState, AssignSuperiorRequest, CreateDepartmentRequest,
    DeleteResponse, DepartmentDto, DepartmentListResponse, DepartmentResponse,
    DepartmentTreeResponse, HierarchyResponse, ReplaceHierarchyRequest, TreeNodeDto,
    UpdateDepartmentRequest, parse_id_set, require_text, sanitize_string,
};

use org_core::{Department, HierarchyMap, MembershipDelta};
use org_db::DepartmentRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use error_location::ErrorLocation;
use uuid::Uuid;

/// GET /api/v1/departments
pub async fn list_departments(
    State(state): State<AppState>,
) -> ApiResult<Json<DepartmentListResponse>> {
    let repo = DepartmentRepository::new(state.pool.clone());
    let departments = repo.find_all().await?;

    Ok(Json(DepartmentListResponse {
        departments: departments.into_iter().map(DepartmentDto::from).collect(),
    }))
}

/// GET /api/v1/departments/{id}
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department_id = Uuid::parse_str(&id)?;

    let repo = DepartmentRepository::new(state.pool.clone());
    let department = repo
        .find_by_id(department_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Department {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(DepartmentResponse {
        department: department.into(),
    }))
}

/// POST /api/v1/departments
pub async fn create_department(
    State(state): State<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    // 1. Validate input
    let name = require_text(&req.name, "name", "Name is required")?;
    let description = req.description.as_deref().map(sanitize_string);

    let mut department = Department::new(name, description.filter(|d| !d.is_empty()));
    department.members = parse_id_set(&req.members, "members")?;

    // 2. Validate the hierarchy against the initial members
    if let Some(ref wire) = req.hierarchy {
        let proposed = HierarchyMap::from_wire(wire)?;
        let validated = state
            .hierarchy
            .create_department_hierarchy(&department.members, proposed)
            .await?;
        department.members.extend(validated.enrolled);
        department.hierarchy = validated.hierarchy;
    }

    // 3. Save department, memberships and hierarchy together
    let repo = DepartmentRepository::new(state.pool.clone());
    repo.create(&department).await?;

    log::info!(
        "Created department {} with {} member(s) via REST API",
        department.id,
        department.members.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(DepartmentResponse {
            department: department.into(),
        }),
    ))
}

/// PUT /api/v1/departments/{id}
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department_id = Uuid::parse_str(&id)?;

    // 1. Fetch existing department
    let repo = DepartmentRepository::new(state.pool.clone());
    let mut department = repo
        .find_by_id(department_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Department {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let expected_version = req.expected_version.unwrap_or(department.version);
    if expected_version != department.version {
        return Err(ApiError::Conflict {
            message: "Department was modified by another request".into(),
            current_version: department.version,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // Member-only edits go through the hierarchy service
    if req.name.is_none()
        && req.description.is_none()
        && req.hierarchy.is_none()
        && let Some(ref members) = req.members
    {
        let target = parse_id_set(members, "members")?;
        let committed = state
            .hierarchy
            .update_department_members(department_id, target, Some(expected_version))
            .await?;

        log::info!(
            "Updated members of department {} via REST API (version {})",
            department_id,
            committed.version
        );

        let department = repo
            .find_by_id(department_id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                message: format!("Department {} not found", id),
                location: ErrorLocation::from(Location::caller()),
            })?;
        return Ok(Json(DepartmentResponse {
            department: department.into(),
        }));
    }

    // 2. Apply provided fields
    if let Some(ref name) = req.name {
        department.name = require_text(name, "name", "Name cannot be empty")?;
    }
    if let Some(ref description) = req.description {
        let description = sanitize_string(description);
        department.description = (!description.is_empty()).then_some(description);
    }

    // 3. Reconcile members; leavers drop out of the hierarchy
    if let Some(ref members) = req.members {
        let target = parse_id_set(members, "members")?;
        let delta = MembershipDelta::between(&department.members, &target);
        for employee_id in &delta.removed {
            department.remove_member(employee_id);
        }
        department.members.extend(delta.added);
    }

    // 4. Validate a replacement hierarchy against the resulting members
    if let Some(ref wire) = req.hierarchy {
        let proposed = HierarchyMap::from_wire(wire)?;
        let validated = state
            .hierarchy
            .validate_hierarchy(&department.members, proposed)
            .await?;
        department.members.extend(validated.enrolled);
        department.hierarchy = validated.hierarchy;
    }
    department.updated_at = Utc::now();

    // 5. Save; a concurrent writer since step 1 makes this a conflict
    department.version = repo.update(&department, expected_version).await?;

    log::info!(
        "Updated department {} via REST API (version {})",
        department.id,
        department.version
    );

    Ok(Json(DepartmentResponse {
        department: department.into(),
    }))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let department_id = Uuid::parse_str(&id)?;

    let repo = DepartmentRepository::new(state.pool.clone());
    if !repo.delete(department_id).await? {
        return Err(ApiError::NotFound {
            message: format!("Department {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    log::info!("Deleted department {} via REST API", department_id);

    Ok(Json(DeleteResponse {
        deleted_id: department_id.to_string(),
    }))
}

/// GET /api/v1/departments/{id}/tree
pub async fn get_department_tree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DepartmentTreeResponse>> {
    let department_id = Uuid::parse_str(&id)?;

    let roots = state.hierarchy.get_department_tree(department_id).await?;

    Ok(Json(DepartmentTreeResponse {
        department_id: department_id.to_string(),
        roots: roots.into_iter().map(TreeNodeDto::from).collect(),
    }))
}

/// PUT /api/v1/departments/{id}/hierarchy
///
/// Replace the whole reporting structure
pub async fn replace_hierarchy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceHierarchyRequest>,
) -> ApiResult<Json<HierarchyResponse>> {
    let department_id = Uuid::parse_str(&id)?;
    let proposed = HierarchyMap::from_wire(&req.hierarchy)?;

    let committed = state
        .hierarchy
        .update_department_hierarchy(department_id, proposed, req.expected_version)
        .await?;

    log::info!(
        "Replaced hierarchy of department {} via REST API ({} entries, version {})",
        department_id,
        committed.hierarchy.len(),
        committed.version
    );

    Ok(Json(committed.into()))
}

/// PUT /api/v1/departments/{id}/hierarchy/{employee_id}
///
/// Point one employee at a new superior, or make them a root
pub async fn assign_superior(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(String, String)>,
    Json(req): Json<AssignSuperiorRequest>,
) -> ApiResult<Json<HierarchyResponse>> {
    let department_id = Uuid::parse_str(&id)?;
    let employee_id = Uuid::parse_str(&employee_id)?;
    let superior = match req.superior.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(superior) => Some(Uuid::parse_str(superior)?),
    };

    let committed = state
        .hierarchy
        .assign_superior(department_id, employee_id, superior, req.expected_version)
        .await?;

    log::info!(
        "Set superior of {} in department {} to {:?} via REST API",
        employee_id,
        department_id,
        superior
    );

    Ok(Json(committed.into()))
}
