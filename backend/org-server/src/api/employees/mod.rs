pub mod create_employee_request;
pub mod department_hierarchy_view_dto;
pub mod employee_details_response;
pub mod employee_dto;
pub mod employee_list_response;
pub mod employee_response;
#[allow(clippy::module_inception)]
pub mod employees;
pub mod person_ref_dto;
pub mod update_employee_request;
