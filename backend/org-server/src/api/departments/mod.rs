pub mod assign_superior_request;
pub mod create_department_request;
pub mod department_dto;
pub mod department_list_response;
pub mod department_response;
pub mod department_tree_response;
#[allow(clippy::module_inception)]
pub mod departments;
pub mod hierarchy_response;
pub mod replace_hierarchy_request;
pub mod tree_node_dto;
pub mod update_department_request;
