//! Department repository.
//!
//! ## Versioning
//!
//! Every committed write to a department (fields, members, or hierarchy)
//! advances `version`. Writers that pass an expected version get a
//! compare-and-swap: if another writer got there first the transaction is
//! rolled back and `DbError::VersionConflict` carries the version now
//! stored.

use crate::repositories::department_links::{
    add_members, bump_version, ensure_employees_exist,
    load_all_hierarchies, load_all_memberships, load_hierarchy, load_members, remove_members,
    replace_hierarchy,
};
use crate::rows::{parse_uuid, timestamp_column, uuid_column};
use crate::Result as DbErrorResult;

use org_core::{Department, DepartmentId, EmployeeId, HierarchyMap, MembershipDelta};

use std::collections::{BTreeSet, HashMap};

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct DepartmentRepository {
    pool: SqlitePool,
}

impl DepartmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the department with its members and hierarchy. Every
    /// referenced employee must already exist.
    pub async fn create(&self, department: &Department) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        // Insert first so the deferred transaction holds the write lock
        // before the existence checks read anything.
        sqlx::query(
            r#"
                INSERT INTO org_departments (id, name, description, version, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(department.id.to_string())
        .bind(&department.name)
        .bind(&department.description)
        .bind(department.version)
        .bind(department.created_at.timestamp())
        .bind(department.updated_at.timestamp())
        .execute(&mut *tx)
        .await?;

        ensure_employees_exist(&mut tx, &department.members).await?;
        ensure_employees_exist(&mut tx, &department.hierarchy.referenced_ids()).await?;

        add_members(&mut tx, department.id, &department.members).await?;
        replace_hierarchy(&mut tx, department.id, &department.hierarchy).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: DepartmentId) -> DbErrorResult<Option<Department>> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(
            r#"
                SELECT id, name, description, version, created_at, updated_at
                FROM org_departments
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let members = load_members(&mut conn, id).await?;
        let hierarchy = load_hierarchy(&mut conn, id).await?;
        department_from_row(&row, members, hierarchy).map(Some)
    }

    /// Every department, ordered by name.
    pub async fn find_all(&self) -> DbErrorResult<Vec<Department>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            r#"
                SELECT id, name, description, version, created_at, updated_at
                FROM org_departments
                ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut members: HashMap<DepartmentId, BTreeSet<EmployeeId>> = HashMap::new();
        for (department_id, employee_id) in load_all_memberships(&mut conn).await? {
            members.entry(department_id).or_default().insert(employee_id);
        }
        let mut hierarchies = load_all_hierarchies(&mut conn).await?;

        rows.iter()
            .map(|r| -> DbErrorResult<Department> {
                let id = uuid_column(r, "id")?;
                department_from_row(
                    r,
                    members.remove(&id).unwrap_or_default(),
                    hierarchies.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Departments the employee is a member of.
    pub async fn find_by_member(&self, employee_id: EmployeeId) -> DbErrorResult<Vec<Department>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
                SELECT d.id
                FROM org_departments d
                JOIN org_department_members m ON m.department_id = d.id
                WHERE m.employee_id = ?
                ORDER BY d.name COLLATE NOCASE, d.id
            "#,
        )
        .bind(employee_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut departments = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = parse_uuid(&raw, "org_departments.id")?;
            if let Some(department) = self.find_by_id(id).await? {
                departments.push(department);
            }
        }
        Ok(departments)
    }

    /// Write name, description, members, and hierarchy if the stored version
    /// still equals `expected_version`. Returns the new version.
    pub async fn update(
        &self,
        department: &Department,
        expected_version: i32,
    ) -> DbErrorResult<i32> {
        let mut tx = self.pool.begin().await?;

        let version = bump_version(&mut tx, department.id, Some(expected_version)).await?;

        sqlx::query(
            r#"
                UPDATE org_departments
                SET name = ?, description = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&department.name)
        .bind(&department.description)
        .bind(department.updated_at.timestamp())
        .bind(department.id.to_string())
        .execute(&mut *tx)
        .await?;

        let current = load_members(&mut tx, department.id).await?;
        let delta = MembershipDelta::between(&current, &department.members);
        apply_membership(&mut tx, department.id, &delta).await?;

        ensure_employees_exist(&mut tx, &department.hierarchy.referenced_ids()).await?;
        replace_hierarchy(&mut tx, department.id, &department.hierarchy).await?;

        tx.commit().await?;
        Ok(version)
    }

    /// Returns false when there was no such department. Memberships and
    /// hierarchy entries go with it.
    pub async fn delete(&self, id: DepartmentId) -> DbErrorResult<bool> {
        let mut tx = self.pool.begin().await?;

        let department = id.to_string();
        sqlx::query("DELETE FROM org_hierarchy_entries WHERE department_id = ?")
            .bind(&department)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM org_department_members WHERE department_id = ?")
            .bind(&department)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM org_departments WHERE id = ?")
            .bind(&department)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the hierarchy and apply `membership` in one transaction,
    /// guarded by `expected_version`. Returns the new version.
    pub async fn save_hierarchy(
        &self,
        id: DepartmentId,
        hierarchy: &HierarchyMap,
        expected_version: i32,
        membership: &MembershipDelta,
    ) -> DbErrorResult<i32> {
        let mut tx = self.pool.begin().await?;

        let version = bump_version(&mut tx, id, Some(expected_version)).await?;
        apply_membership(&mut tx, id, membership).await?;
        ensure_employees_exist(&mut tx, &hierarchy.referenced_ids()).await?;
        replace_hierarchy(&mut tx, id, hierarchy).await?;

        tx.commit().await?;
        Ok(version)
    }

    /// Add and remove members without touching the rest of the hierarchy.
    /// Departing members are pruned from it. Returns the new version.
    pub async fn reconcile_membership(
        &self,
        id: DepartmentId,
        membership: &MembershipDelta,
        expected_version: Option<i32>,
    ) -> DbErrorResult<i32> {
        let mut tx = self.pool.begin().await?;

        let version = bump_version(&mut tx, id, expected_version).await?;
        apply_membership(&mut tx, id, membership).await?;

        tx.commit().await?;
        Ok(version)
    }
}

async fn apply_membership(
    conn: &mut sqlx::SqliteConnection,
    id: DepartmentId,
    membership: &MembershipDelta,
) -> DbErrorResult<()> {
    ensure_employees_exist(conn, &membership.added).await?;
    add_members(conn, id, &membership.added).await?;
    remove_members(conn, id, &membership.removed).await?;
    Ok(())
}

fn department_from_row(
    row: &SqliteRow,
    members: BTreeSet<EmployeeId>,
    hierarchy: HierarchyMap,
) -> DbErrorResult<Department> {
    Ok(Department {
        id: uuid_column(row, "id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        members,
        hierarchy,
        version: row.try_get("version")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}
