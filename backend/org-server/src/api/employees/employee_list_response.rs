use crate::EmployeeDto;
use serde::Serialize;

/// List of employees response
#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeDto>,
}
