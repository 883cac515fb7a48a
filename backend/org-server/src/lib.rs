pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    delete_response::DeleteResponse,
    departments::{
        assign_superior_request::AssignSuperiorRequest,
        create_department_request::CreateDepartmentRequest,
        department_dto::DepartmentDto,
        department_list_response::DepartmentListResponse,
        department_response::DepartmentResponse,
        department_tree_response::DepartmentTreeResponse,
        departments::{
            assign_superior, create_department, delete_department, get_department,
            get_department_tree, list_departments, replace_hierarchy, update_department,
        },
        hierarchy_response::HierarchyResponse,
        replace_hierarchy_request::ReplaceHierarchyRequest,
        tree_node_dto::TreeNodeDto,
        update_department_request::UpdateDepartmentRequest,
    },
    employees::{
        create_employee_request::CreateEmployeeRequest,
        department_hierarchy_view_dto::DepartmentHierarchyViewDto,
        employee_details_response::EmployeeDetailsResponse,
        employee_dto::EmployeeDto,
        employee_list_response::EmployeeListResponse,
        employee_response::EmployeeResponse,
        employees::{
            create_employee, delete_employee, get_employee, get_employee_details,
            list_employees, update_employee,
        },
        person_ref_dto::PersonRefDto,
        update_employee_request::UpdateEmployeeRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    input::{parse_id_set, require_text, sanitize_string},
};
pub use app_state::AppState;

pub use crate::routes::build_router;
