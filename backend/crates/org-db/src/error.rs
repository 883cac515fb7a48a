use org_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Row not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Duplicate value: {message} {location}")]
    Duplicate {
        message: String,
        location: ErrorLocation,
    },

    #[error("Version conflict: row is at version {current_version} {location}")]
    VersionConflict {
        current_version: i32,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let Some(db_error) = source.as_database_error()
            && db_error.is_unique_violation()
        {
            return Self::Duplicate {
                message: db_error.message().to_string(),
                location,
            };
        }

        Self::Sqlx { source, location }
    }
}

impl From<DbError> for CoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DbError::NotFound { message, .. } => CoreError::NotFound { message, location },
            DbError::VersionConflict {
                current_version, ..
            } => CoreError::ConflictingWrite {
                current_version,
                location,
            },
            other => CoreError::Store {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
