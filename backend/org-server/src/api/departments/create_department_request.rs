use org_core::HierarchyWire;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Department name (required)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Initial member employee ids
    #[serde(default)]
    pub members: Vec<String>,

    /// Initial reporting structure, bare or `{superior, subordinates}` entries
    #[serde(default)]
    pub hierarchy: Option<HierarchyWire>,
}
