use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// How hierarchy writes treat employees that are not department members.
///
/// Applied identically by department creation, full replacement and
/// single-edge updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
    /// Referenced employees are added to the department's members.
    #[default]
    Enroll,
    /// Referencing a non-member rejects the write.
    Strict,
}

impl MembershipPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for MembershipPolicy {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().as_str() {
            "enroll" => Ok(Self::Enroll),
            "strict" => Ok(Self::Strict),
            _ => Err(CoreError::Validation {
                message: format!("Invalid membership policy: {s}"),
                field: Some("membership_policy".into()),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for MembershipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
