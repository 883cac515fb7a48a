//! [`DirectoryStore`] backed by the SQLite repositories.

use crate::{DepartmentRepository, EmployeeRepository};

use org_core::{
    CoreResult, DepartmentHierarchySource, DepartmentId, DirectoryStore, EmployeeId, HierarchyMap,
    MembershipDelta, StoredHierarchy,
};

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteDirectoryStore {
    employees: EmployeeRepository,
    departments: DepartmentRepository,
}

impl SqliteDirectoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            employees: EmployeeRepository::new(pool.clone()),
            departments: DepartmentRepository::new(pool),
        }
    }
}

#[async_trait]
impl DirectoryStore for SqliteDirectoryStore {
    async fn get_department_hierarchy(
        &self,
        department_id: DepartmentId,
    ) -> CoreResult<Option<StoredHierarchy>> {
        let department = self.departments.find_by_id(department_id).await?;

        Ok(department.map(|d| StoredHierarchy {
            department_id: d.id,
            department_name: d.name,
            members: d.members,
            hierarchy: d.hierarchy,
            version: d.version,
        }))
    }

    async fn save_department_hierarchy(
        &self,
        department_id: DepartmentId,
        hierarchy: &HierarchyMap,
        expected_version: i32,
        membership: &MembershipDelta,
    ) -> CoreResult<i32> {
        Ok(self
            .departments
            .save_hierarchy(department_id, hierarchy, expected_version, membership)
            .await?)
    }

    async fn list_employee_names(
        &self,
        ids: &[EmployeeId],
    ) -> CoreResult<HashMap<EmployeeId, String>> {
        Ok(self.employees.find_names(ids).await?)
    }

    async fn reconcile_membership(
        &self,
        department_id: DepartmentId,
        membership: &MembershipDelta,
        expected_version: Option<i32>,
    ) -> CoreResult<i32> {
        Ok(self
            .departments
            .reconcile_membership(department_id, membership, expected_version)
            .await?)
    }

    async fn departments_of_employee(
        &self,
        employee_id: EmployeeId,
    ) -> CoreResult<Option<Vec<DepartmentHierarchySource>>> {
        if !self.employees.exists(employee_id).await? {
            return Ok(None);
        }

        let departments = self.departments.find_by_member(employee_id).await?;
        Ok(Some(
            departments
                .into_iter()
                .map(|d| DepartmentHierarchySource {
                    department_id: d.id,
                    department_name: d.name,
                    hierarchy: d.hierarchy,
                })
                .collect(),
        ))
    }
}
