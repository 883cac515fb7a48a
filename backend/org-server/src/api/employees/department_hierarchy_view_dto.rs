use crate::PersonRefDto;

use org_core::DepartmentHierarchyView;

use serde::Serialize;

/// Where an employee sits inside one department
#[derive(Debug, Serialize)]
pub struct DepartmentHierarchyViewDto {
    pub department_id: String,
    pub department_name: String,
    pub superior: Option<PersonRefDto>,
    pub subordinates: Vec<PersonRefDto>,
}

impl From<DepartmentHierarchyView> for DepartmentHierarchyViewDto {
    fn from(v: DepartmentHierarchyView) -> Self {
        Self {
            department_id: v.department_id.to_string(),
            department_name: v.department_name,
            superior: v.superior.map(PersonRefDto::from),
            subordinates: v.subordinates.into_iter().map(PersonRefDto::from).collect(),
        }
    }
}
