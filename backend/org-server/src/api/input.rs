//! Request input normalization shared by the handlers.

use crate::{ApiError, ApiResult};

use std::collections::BTreeSet;
use std::panic::Location;

use error_location::ErrorLocation;
use uuid::Uuid;

/// Trim surrounding whitespace from user text.
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

/// Trimmed value of a required text field; blank is a validation error.
#[track_caller]
pub fn require_text(value: &str, field: &str, message: &str) -> ApiResult<String> {
    let value = sanitize_string(value);
    if value.is_empty() {
        return Err(ApiError::Validation {
            message: message.to_string(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(value)
}

/// Parse a list of id strings into a set. Blank entries are skipped.
#[track_caller]
pub fn parse_id_set(ids: &[String], field: &str) -> ApiResult<BTreeSet<Uuid>> {
    let location = Location::caller();
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| {
            Uuid::parse_str(id).map_err(|e| ApiError::Validation {
                message: format!("Invalid id '{id}': {e}"),
                field: Some(field.to_string()),
                location: ErrorLocation::from(location),
            })
        })
        .collect()
}
