//! REST API error types
//!
//! Every failure renders as `{"error": {code, message, field?, chain?}}`.
//! Storage failures never share a code with validation failures.

use org_core::CoreError;
use org_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional detail fields
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CYCLE_DETECTED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Employee ids forming the rejected reporting loop, first id repeated last
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<i32>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Proposed hierarchy contains a reporting loop (422)
    #[error("Cycle detected: {message} {location}")]
    CycleDetected {
        message: String,
        chain: Vec<Uuid>,
        location: ErrorLocation,
    },

    /// Hierarchy names an employee the department cannot accept (422)
    #[error("Unknown reference: {message} {location}")]
    UnknownReference {
        message: String,
        location: ErrorLocation,
    },

    /// Version conflict for optimistic locking (409)
    #[error("Conflict: resource was modified (current version: {current_version}) {location}")]
    Conflict {
        message: String,
        current_version: i32,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            _ => log::warn!("{}", self),
        }

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new("NOT_FOUND", message),
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    field,
                    ..ApiErrorBody::new("VALIDATION_ERROR", message)
                },
            ),
            ApiError::CycleDetected { message, chain, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    chain: Some(chain.iter().map(Uuid::to_string).collect()),
                    ..ApiErrorBody::new("CYCLE_DETECTED", message)
                },
            ),
            ApiError::UnknownReference { message, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new("UNKNOWN_REFERENCE", message),
            ),
            ApiError::Conflict {
                message,
                current_version,
                ..
            } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    current_version: Some(current_version),
                    ..ApiErrorBody::new(
                        "CONFLICT",
                        format!("{} (current version: {})", message, current_version),
                    )
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody::new("INTERNAL_ERROR", message),
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl ApiErrorBody {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.into(),
            message,
            field: None,
            chain: None,
            current_version: None,
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert hierarchy/domain errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            CoreError::CycleDetected { chain, .. } => ApiError::CycleDetected {
                message: format!(
                    "Reporting chain would loop: {}",
                    org_core::error::format_chain(&chain)
                ),
                chain,
                location,
            },
            CoreError::UnknownReference {
                employee_id,
                message,
                ..
            } => ApiError::UnknownReference {
                message: format!("Employee {employee_id}: {message}"),
                location,
            },
            CoreError::InconsistentEntry {
                employee_id,
                claimed_by,
                ..
            } => ApiError::Validation {
                message: format!(
                    "Employee {employee_id} is listed as a subordinate of {claimed_by} but names a different superior"
                ),
                field: Some("hierarchy".into()),
                location,
            },
            CoreError::NotFound { message, .. } => ApiError::NotFound { message, location },
            CoreError::ConflictingWrite {
                current_version, ..
            } => ApiError::Conflict {
                message: "Department was modified by another request".to_string(),
                current_version,
                location,
            },
            CoreError::Store { message, .. } => {
                // Don't expose internal database details to clients
                log::error!("Storage error: {}", message);
                ApiError::Internal {
                    message: "Storage operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::NotFound { message, .. } => ApiError::NotFound { message, location },
            DbError::Duplicate { .. } => ApiError::Validation {
                message: "Email is already in use".to_string(),
                field: Some("email".into()),
                location,
            },
            DbError::VersionConflict {
                current_version, ..
            } => ApiError::Conflict {
                message: "Department was modified by another request".to_string(),
                current_version,
                location,
            },
            other => {
                // Don't expose internal database details to clients
                log::error!("Database error: {}", other);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
