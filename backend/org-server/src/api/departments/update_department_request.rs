use org_core::HierarchyWire;

use serde::Deserialize;

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Replaces the member set; removed members leave the hierarchy
    #[serde(default)]
    pub members: Option<Vec<String>>,

    /// Replaces the hierarchy, validated against the resulting members
    #[serde(default)]
    pub hierarchy: Option<HierarchyWire>,

    /// Version the client last read; the update is rejected if it is stale
    #[serde(default)]
    pub expected_version: Option<i32>,
}
