use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Display name (required)
    #[serde(default)]
    pub name: String,

    /// Unique email address (required)
    #[serde(default)]
    pub email: String,

    /// Department ids; at least one is required
    #[serde(default)]
    pub departments: Vec<String>,
}
