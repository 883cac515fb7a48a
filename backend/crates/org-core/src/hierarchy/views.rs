//! Read-optimized projections handed to presentation layers.

use crate::{DepartmentId, EmployeeId};

use serde::Serialize;

/// An employee id paired with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRef {
    pub id: EmployeeId,
    pub name: String,
}

/// One employee's position inside one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentHierarchyView {
    pub department_id: DepartmentId,
    pub department_name: String,
    pub superior: Option<PersonRef>,
    /// Direct subordinates, sorted by display name
    pub subordinates: Vec<PersonRef>,
}

/// Node of a department's rendered reporting forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub employee_id: EmployeeId,
    pub name: String,
    pub children: Vec<TreeNode>,
}
