use crate::EmployeeId;

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// `chain` lists the loop in walk order, closed (first id == last id).
    #[error("Cycle detected in reporting chain: {} {location}", format_chain(.chain))]
    CycleDetected {
        chain: Vec<EmployeeId>,
        location: ErrorLocation,
    },

    #[error("Unknown reference to employee {employee_id}: {message} {location}")]
    UnknownReference {
        employee_id: EmployeeId,
        message: String,
        location: ErrorLocation,
    },

    #[error(
        "Inconsistent hierarchy entry: {employee_id} is listed under {claimed_by} but names {stated_superior:?} as superior {location}"
    )]
    InconsistentEntry {
        employee_id: EmployeeId,
        stated_superior: Option<EmployeeId>,
        claimed_by: EmployeeId,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Conflicting write: department was modified (current version: {current_version}) {location}")]
    ConflictingWrite {
        current_version: i32,
        location: ErrorLocation,
    },

    #[error("Storage error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// True for failures a client can fix by resubmitting different data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::CycleDetected { .. }
                | Self::UnknownReference { .. }
                | Self::InconsistentEntry { .. }
        )
    }

    /// True when the same request may succeed after re-reading current state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConflictingWrite { .. })
    }
}

/// Render a chain as `a → b → a` using short ids.
pub fn format_chain(chain: &[EmployeeId]) -> String {
    chain
        .iter()
        .map(|id| id.to_string()[..8].to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

pub type Result<T> = StdResult<T, CoreError>;
