use serde::Deserialize;

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Replaces the whole department set when present
    #[serde(default)]
    pub departments: Option<Vec<String>>,

    /// Single-department shorthand, used when `departments` is absent
    #[serde(default)]
    pub department: Option<String>,
}
