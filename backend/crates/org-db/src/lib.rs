pub mod connection;
pub mod error;
pub mod repositories;
pub mod store;

mod rows;


pub use connection::pool::{open_in_memory_pool, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::department_repository::DepartmentRepository;
pub use repositories::employee_repository::EmployeeRepository;
pub use store::sqlite_directory_store::SqliteDirectoryStore;
