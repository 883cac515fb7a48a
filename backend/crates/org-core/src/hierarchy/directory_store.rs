//! Persistence seam for the hierarchy service.
//!
//! Implementations own Employee and Department records. Writes must be
//! at-most-one-writer per department: `save_department_hierarchy` compares
//! `expected_version` with the stored version and fails with
//! `CoreError::ConflictingWrite` instead of overwriting newer state.

use crate::{
    CoreResult, DepartmentHierarchySource, DepartmentId, EmployeeId, HierarchyMap,
    MembershipDelta,
};

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

/// Snapshot of one department's hierarchy as last committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredHierarchy {
    pub department_id: DepartmentId,
    pub department_name: String,
    pub members: BTreeSet<EmployeeId>,
    pub hierarchy: HierarchyMap,
    pub version: i32,
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// `None` when the department does not exist.
    async fn get_department_hierarchy(
        &self,
        department_id: DepartmentId,
    ) -> CoreResult<Option<StoredHierarchy>>;

    /// Replace the hierarchy and apply `membership` in one atomic commit.
    /// Returns the new version.
    async fn save_department_hierarchy(
        &self,
        department_id: DepartmentId,
        hierarchy: &HierarchyMap,
        expected_version: i32,
        membership: &MembershipDelta,
    ) -> CoreResult<i32>;

    /// Names for the ids that exist; unknown ids are simply absent.
    async fn list_employee_names(
        &self,
        ids: &[EmployeeId],
    ) -> CoreResult<HashMap<EmployeeId, String>>;

    /// Add/remove members, keeping both sides of the cross reference and
    /// pruning removed members from the department's hierarchy. Fails with
    /// `ConflictingWrite` when `expected_version` is stale; returns the new
    /// version.
    async fn reconcile_membership(
        &self,
        department_id: DepartmentId,
        membership: &MembershipDelta,
        expected_version: Option<i32>,
    ) -> CoreResult<i32>;

    /// Hierarchies of every department the employee belongs to, or `None`
    /// when the employee does not exist.
    async fn departments_of_employee(
        &self,
        employee_id: EmployeeId,
    ) -> CoreResult<Option<Vec<DepartmentHierarchySource>>>;
}
