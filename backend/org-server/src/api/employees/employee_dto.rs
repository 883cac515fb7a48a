use org_core::Employee;

use serde::Serialize;

/// Employee DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct EmployeeDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub departments: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name,
            email: e.email,
            departments: e.departments.iter().map(|id| id.to_string()).collect(),
            created_at: e.created_at.timestamp(),
            updated_at: e.updated_at.timestamp(),
        }
    }
}
