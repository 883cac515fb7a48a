use crate::TreeNodeDto;
use serde::Serialize;

/// Reporting forest of one department, roots first
#[derive(Debug, Serialize)]
pub struct DepartmentTreeResponse {
    pub department_id: String,
    pub roots: Vec<TreeNodeDto>,
}
