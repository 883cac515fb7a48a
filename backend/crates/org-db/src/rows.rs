//! Column decoding shared by the repositories.
//!
//! Ids are stored as hyphenated UUID text, timestamps as unix seconds.

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

#[track_caller]
pub(crate) fn uuid_column(row: &SqliteRow, column: &str) -> DbErrorResult<Uuid> {
    let raw: String = row.try_get(column)?;
    parse_uuid(&raw, column)
}

#[track_caller]
pub(crate) fn optional_uuid_column(row: &SqliteRow, column: &str) -> DbErrorResult<Option<Uuid>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|r| parse_uuid(&r, column)).transpose()
}

#[track_caller]
pub(crate) fn timestamp_column(row: &SqliteRow, column: &str) -> DbErrorResult<DateTime<Utc>> {
    let seconds: i64 = row.try_get(column)?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in {column}: {seconds}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn parse_uuid(raw: &str, column: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DbError::Initialization {
        message: format!("Invalid UUID in {column}: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
