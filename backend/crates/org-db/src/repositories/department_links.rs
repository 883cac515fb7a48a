//! Membership and hierarchy-entry statements shared by both repositories.
//!
//! Every function takes the caller's connection so that multi-table writes
//! commit or roll back together inside one transaction.

use crate::rows::{optional_uuid_column, uuid_column};
use crate::{DbError, Result as DbErrorResult};

use org_core::{DepartmentId, EmployeeId, HierarchyMap};

use std::collections::{BTreeSet, HashMap};
use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::{Row, SqliteConnection};

pub(crate) async fn load_members(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
) -> DbErrorResult<BTreeSet<EmployeeId>> {
    let rows = sqlx::query(
        "SELECT employee_id FROM org_department_members WHERE department_id = ?",
    )
    .bind(department_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|r| uuid_column(r, "employee_id"))
        .collect()
}

pub(crate) async fn load_hierarchy(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
) -> DbErrorResult<HierarchyMap> {
    let rows = sqlx::query(
        "SELECT employee_id, superior_id FROM org_hierarchy_entries WHERE department_id = ?",
    )
    .bind(department_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|r| -> DbErrorResult<_> {
            Ok((uuid_column(r, "employee_id")?, optional_uuid_column(r, "superior_id")?))
        })
        .collect()
}

pub(crate) async fn load_departments_of(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> DbErrorResult<BTreeSet<DepartmentId>> {
    let rows = sqlx::query(
        "SELECT department_id FROM org_department_members WHERE employee_id = ?",
    )
    .bind(employee_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|r| uuid_column(r, "department_id"))
        .collect()
}

/// All membership rows as `(department_id, employee_id)` pairs.
pub(crate) async fn load_all_memberships(
    conn: &mut SqliteConnection,
) -> DbErrorResult<Vec<(DepartmentId, EmployeeId)>> {
    let rows = sqlx::query("SELECT department_id, employee_id FROM org_department_members")
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|r| -> DbErrorResult<_> {
            Ok((uuid_column(r, "department_id")?, uuid_column(r, "employee_id")?))
        })
        .collect()
}

pub(crate) async fn load_all_hierarchies(
    conn: &mut SqliteConnection,
) -> DbErrorResult<HashMap<DepartmentId, HierarchyMap>> {
    let rows =
        sqlx::query("SELECT department_id, employee_id, superior_id FROM org_hierarchy_entries")
            .fetch_all(&mut *conn)
            .await?;

    let mut hierarchies: HashMap<DepartmentId, HierarchyMap> = HashMap::new();
    for r in &rows {
        hierarchies
            .entry(uuid_column(r, "department_id")?)
            .or_default()
            .insert(uuid_column(r, "employee_id")?, optional_uuid_column(r, "superior_id")?);
    }
    Ok(hierarchies)
}

pub(crate) async fn ensure_employees_exist(
    conn: &mut SqliteConnection,
    employee_ids: impl IntoIterator<Item = &EmployeeId>,
) -> DbErrorResult<()> {
    for employee_id in employee_ids {
        let found = sqlx::query("SELECT 1 FROM org_employees WHERE id = ?")
            .bind(employee_id.to_string())
            .fetch_optional(&mut *conn)
            .await?;
        if found.is_none() {
            return Err(DbError::NotFound {
                message: format!("Employee {employee_id} not found"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }
    Ok(())
}

pub(crate) async fn ensure_departments_exist(
    conn: &mut SqliteConnection,
    department_ids: impl IntoIterator<Item = &DepartmentId>,
) -> DbErrorResult<()> {
    for department_id in department_ids {
        let found = sqlx::query("SELECT 1 FROM org_departments WHERE id = ?")
            .bind(department_id.to_string())
            .fetch_optional(&mut *conn)
            .await?;
        if found.is_none() {
            return Err(DbError::NotFound {
                message: format!("Department {department_id} not found"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }
    Ok(())
}

pub(crate) async fn add_members(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    employee_ids: impl IntoIterator<Item = &EmployeeId>,
) -> DbErrorResult<()> {
    for employee_id in employee_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO org_department_members (department_id, employee_id) VALUES (?, ?)",
        )
        .bind(department_id.to_string())
        .bind(employee_id.to_string())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Drop memberships and every hierarchy reference to the removed employees.
pub(crate) async fn remove_members(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    employee_ids: impl IntoIterator<Item = &EmployeeId>,
) -> DbErrorResult<()> {
    for employee_id in employee_ids {
        sqlx::query(
            "DELETE FROM org_department_members WHERE department_id = ? AND employee_id = ?",
        )
        .bind(department_id.to_string())
        .bind(employee_id.to_string())
        .execute(&mut *conn)
        .await?;

        prune_from_hierarchy(conn, department_id, *employee_id).await?;
    }
    Ok(())
}

/// Remove the employee's entry; their direct subordinates become roots.
pub(crate) async fn prune_from_hierarchy(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    employee_id: EmployeeId,
) -> DbErrorResult<()> {
    let department = department_id.to_string();
    let employee = employee_id.to_string();

    sqlx::query("DELETE FROM org_hierarchy_entries WHERE department_id = ? AND employee_id = ?")
        .bind(&department)
        .bind(&employee)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "UPDATE org_hierarchy_entries SET superior_id = NULL WHERE department_id = ? AND superior_id = ?",
    )
    .bind(&department)
    .bind(&employee)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub(crate) async fn replace_hierarchy(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    hierarchy: &HierarchyMap,
) -> DbErrorResult<()> {
    let department = department_id.to_string();

    sqlx::query("DELETE FROM org_hierarchy_entries WHERE department_id = ?")
        .bind(&department)
        .execute(&mut *conn)
        .await?;

    for (employee_id, superior_id) in hierarchy.iter() {
        sqlx::query(
            "INSERT INTO org_hierarchy_entries (department_id, employee_id, superior_id) VALUES (?, ?, ?)",
        )
        .bind(&department)
        .bind(employee_id.to_string())
        .bind(superior_id.map(|s| s.to_string()))
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Advance a department's version.
///
/// With `expected_version` the update is a compare-and-swap: a department
/// at any other version is left untouched and reported as
/// `VersionConflict`. Returns the new version.
pub(crate) async fn bump_version(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    expected_version: Option<i32>,
) -> DbErrorResult<i32> {
    let location = ErrorLocation::from(Location::caller());
    let id = department_id.to_string();
    let now = Utc::now().timestamp();

    let result = match expected_version {
        Some(expected) => {
            sqlx::query(
                "UPDATE org_departments SET version = version + 1, updated_at = ? WHERE id = ? AND version = ?",
            )
            .bind(now)
            .bind(&id)
            .bind(expected)
            .execute(&mut *conn)
            .await?
        }
        None => {
            sqlx::query(
                "UPDATE org_departments SET version = version + 1, updated_at = ? WHERE id = ?",
            )
            .bind(now)
            .bind(&id)
            .execute(&mut *conn)
            .await?
        }
    };

    let current: Option<i32> = sqlx::query("SELECT version FROM org_departments WHERE id = ?")
        .bind(&id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|r| r.try_get("version"))
        .transpose()?;

    match (result.rows_affected(), current) {
        (_, None) => Err(DbError::NotFound {
            message: format!("Department {department_id} not found"),
            location,
        }),
        (0, Some(current_version)) => Err(DbError::VersionConflict {
            current_version,
            location,
        }),
        (_, Some(version)) => Ok(version),
    }
}
