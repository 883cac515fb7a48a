pub mod sqlite_directory_store;
