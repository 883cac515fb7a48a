use crate::DepartmentDto;
use serde::Serialize;

/// Single department response
#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub department: DepartmentDto,
}
