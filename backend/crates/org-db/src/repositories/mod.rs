pub(crate) mod department_links;
pub mod department_repository;
pub mod employee_repository;
