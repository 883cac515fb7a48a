use org_core::{CommittedHierarchy, HierarchyWire};

use serde::Serialize;

/// Result of a committed hierarchy write
#[derive(Debug, Serialize)]
pub struct HierarchyResponse {
    pub department_id: String,
    pub hierarchy: HierarchyWire,
    /// Employees added to the department's members by this write
    pub enrolled: Vec<String>,
    pub version: i32,
}

impl From<CommittedHierarchy> for HierarchyResponse {
    fn from(c: CommittedHierarchy) -> Self {
        Self {
            department_id: c.department_id.to_string(),
            hierarchy: c.hierarchy.to_wire(),
            enrolled: c.enrolled.iter().map(|id| id.to_string()).collect(),
            version: c.version,
        }
    }
}
