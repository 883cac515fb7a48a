use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssignSuperiorRequest {
    /// New superior id; null or blank makes the employee a root
    #[serde(default)]
    pub superior: Option<String>,

    #[serde(default)]
    pub expected_version: Option<i32>,
}
