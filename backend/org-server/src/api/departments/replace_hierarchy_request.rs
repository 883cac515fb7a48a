use org_core::HierarchyWire;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReplaceHierarchyRequest {
    pub hierarchy: HierarchyWire,

    #[serde(default)]
    pub expected_version: Option<i32>,
}
