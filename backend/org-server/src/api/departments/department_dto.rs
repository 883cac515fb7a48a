use org_core::{Department, HierarchyWire};

use serde::Serialize;

/// Department DTO for JSON serialization
///
/// `hierarchy` uses the bare wire form: employee id to superior id or null.
#[derive(Debug, Serialize)]
pub struct DepartmentDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
    pub hierarchy: HierarchyWire,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Department> for DepartmentDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name,
            description: d.description,
            members: d.members.iter().map(|id| id.to_string()).collect(),
            hierarchy: d.hierarchy.to_wire(),
            version: d.version,
            created_at: d.created_at.timestamp(),
            updated_at: d.updated_at.timestamp(),
        }
    }
}
