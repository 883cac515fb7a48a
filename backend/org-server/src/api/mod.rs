pub mod delete_response;
pub mod departments;
pub mod employees;
pub mod error;
pub mod input;
