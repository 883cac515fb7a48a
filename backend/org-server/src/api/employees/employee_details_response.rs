use crate::{DepartmentHierarchyViewDto, EmployeeDto};
use serde::Serialize;

/// Employee plus their superior and subordinates in each department
#[derive(Debug, Serialize)]
pub struct EmployeeDetailsResponse {
    pub employee: EmployeeDto,
    pub hierarchy: Vec<DepartmentHierarchyViewDto>,
}
