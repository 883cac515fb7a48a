use crate::EmployeeDto;
use serde::Serialize;

/// Single employee response
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub employee: EmployeeDto,
}
