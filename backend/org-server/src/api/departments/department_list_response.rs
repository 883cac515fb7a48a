use crate::DepartmentDto;
use serde::Serialize;

/// List of departments response
#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub departments: Vec<DepartmentDto>,
}
