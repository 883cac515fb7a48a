//! Employee repository.
//!
//! An employee's department list is not stored on the employee row; it is
//! read from `org_department_members`, the same rows that make up each
//! department's member set. Changing it here changes both sides.

use crate::repositories::department_links::{
    add_members, bump_version, ensure_departments_exist, load_all_memberships,
    load_departments_of, prune_from_hierarchy, remove_members,
};
use crate::rows::{parse_uuid, timestamp_column, uuid_column};
use crate::{DbError, Result as DbErrorResult};

use org_core::{DepartmentId, Employee, EmployeeId, MembershipDelta};

use std::collections::{BTreeSet, HashMap};
use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the employee and join every listed department.
    pub async fn create(&self, employee: &Employee) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        // Write before any read so the deferred transaction takes the write
        // lock up front instead of upgrading a stale read snapshot.
        sqlx::query(
            r#"
                INSERT INTO org_employees (id, name, email, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.created_at.timestamp())
        .bind(employee.updated_at.timestamp())
        .execute(&mut *tx)
        .await?;

        ensure_departments_exist(&mut tx, &employee.departments).await?;

        for department_id in &employee.departments {
            add_members(&mut tx, *department_id, [&employee.id]).await?;
            bump_version(&mut tx, *department_id, None).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Employee>> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(
            r#"
                SELECT id, name, email, created_at, updated_at
                FROM org_employees
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let departments = load_departments_of(&mut conn, id).await?;
        employee_from_row(&row, departments).map(Some)
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Employee>> {
        let id: Option<String> = sqlx::query_scalar("SELECT id FROM org_employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match id {
            Some(raw) => self.find_by_id(parse_uuid(&raw, "org_employees.id")?).await,
            None => Ok(None),
        }
    }

    /// Every employee, ordered by name.
    pub async fn find_all(&self) -> DbErrorResult<Vec<Employee>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            r#"
                SELECT id, name, email, created_at, updated_at
                FROM org_employees
                ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut departments: HashMap<EmployeeId, BTreeSet<DepartmentId>> = HashMap::new();
        for (department_id, employee_id) in load_all_memberships(&mut conn).await? {
            departments.entry(employee_id).or_default().insert(department_id);
        }

        rows.iter()
            .map(|r| -> DbErrorResult<Employee> {
                let id = uuid_column(r, "id")?;
                employee_from_row(r, departments.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    /// Names of the given employees. Ids that do not exist are absent from
    /// the result.
    pub async fn find_names(&self, ids: &[EmployeeId]) -> DbErrorResult<HashMap<EmployeeId, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, name FROM org_employees WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = query.build().fetch_all(&self.pool).await?;

        rows.iter()
            .map(|r| -> DbErrorResult<_> {
                let name: String = r.try_get("name")?;
                Ok((uuid_column(r, "id")?, name))
            })
            .collect()
    }

    pub async fn exists(&self, id: EmployeeId) -> DbErrorResult<bool> {
        let found = sqlx::query("SELECT 1 FROM org_employees WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    /// Write name/email and move the employee to exactly
    /// `employee.departments`. Departments they leave lose them from their
    /// member set and hierarchy.
    pub async fn update(&self, employee: &Employee) -> DbErrorResult<MembershipDelta> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                UPDATE org_employees
                SET name = ?, email = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(employee.updated_at.timestamp())
        .bind(employee.id.to_string())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                message: format!("Employee {} not found", employee.id),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let current = load_departments_of(&mut tx, employee.id).await?;
        let delta = MembershipDelta::between(&current, &employee.departments);

        ensure_departments_exist(&mut tx, &delta.added).await?;
        for department_id in &delta.added {
            add_members(&mut tx, *department_id, [&employee.id]).await?;
            bump_version(&mut tx, *department_id, None).await?;
        }
        for department_id in &delta.removed {
            remove_members(&mut tx, *department_id, [&employee.id]).await?;
            bump_version(&mut tx, *department_id, None).await?;
        }

        tx.commit().await?;
        Ok(delta)
    }

    /// Remove the employee along with every membership and hierarchy
    /// reference. Returns false when there was no such employee.
    pub async fn delete(&self, id: EmployeeId) -> DbErrorResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Hierarchies of departments the employee was never a member of can
        // still point at them. Running this write first also takes the write
        // lock before the membership read below.
        sqlx::query("UPDATE org_hierarchy_entries SET superior_id = NULL WHERE superior_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        for department_id in load_departments_of(&mut tx, id).await? {
            prune_from_hierarchy(&mut tx, department_id, id).await?;
            bump_version(&mut tx, department_id, None).await?;
        }

        let result = sqlx::query("DELETE FROM org_employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn employee_from_row(row: &SqliteRow, departments: BTreeSet<DepartmentId>) -> DbErrorResult<Employee> {
    Ok(Employee {
        id: uuid_column(row, "id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        departments,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

