//! Hierarchy operations exposed to the API layer.
//!
//! Validation always completes before anything is written; a rejected
//! proposal leaves stored state untouched.

use crate::{
    CoreError, CoreResult, DepartmentHierarchyView, DepartmentId, DirectoryStore, EmployeeId,
    HierarchyMap, MembershipDelta, MembershipPolicy, StoredHierarchy, TreeNode, build_tree,
    resolve, validate_edge, validate_full_replacement,
};

use std::collections::BTreeSet;
use std::panic::Location;

use error_location::ErrorLocation;
use log::{info, warn};

/// A hierarchy that passed cycle and membership checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHierarchy {
    pub hierarchy: HierarchyMap,
    /// Non-members the policy enrolled into the department
    pub enrolled: BTreeSet<EmployeeId>,
}

/// A hierarchy write that was committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedHierarchy {
    pub department_id: DepartmentId,
    pub hierarchy: HierarchyMap,
    pub enrolled: BTreeSet<EmployeeId>,
    pub version: i32,
}

pub struct HierarchyService<S> {
    store: S,
    policy: MembershipPolicy,
}

impl<S: DirectoryStore> HierarchyService<S> {
    pub fn new(store: S, policy: MembershipPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    /// Validate the hierarchy of a department that is about to be created.
    pub async fn create_department_hierarchy(
        &self,
        members: &BTreeSet<EmployeeId>,
        proposed: HierarchyMap,
    ) -> CoreResult<ValidatedHierarchy> {
        self.validate_hierarchy(members, proposed).await
    }

    /// Cycle and membership checks of `proposed` against `members`, without
    /// touching the store. Used when the caller persists the result as part
    /// of a larger department write.
    pub async fn validate_hierarchy(
        &self,
        members: &BTreeSet<EmployeeId>,
        proposed: HierarchyMap,
    ) -> CoreResult<ValidatedHierarchy> {
        validate_full_replacement(&proposed).inspect_err(|e| {
            warn!("Rejected hierarchy: {e}");
        })?;

        let referenced = proposed.referenced_ids();
        let ids: Vec<EmployeeId> = referenced.iter().copied().collect();
        let known = self.store.list_employee_names(&ids).await?;

        if let Some(missing) = referenced.iter().find(|id| !known.contains_key(id)) {
            return Err(CoreError::UnknownReference {
                employee_id: *missing,
                message: "no such employee".into(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let outside: BTreeSet<EmployeeId> = referenced.difference(members).copied().collect();
        if let (MembershipPolicy::Strict, Some(first)) = (self.policy, outside.first()) {
            return Err(CoreError::UnknownReference {
                employee_id: *first,
                message: "not a member of the department".into(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ValidatedHierarchy {
            hierarchy: proposed,
            enrolled: outside,
        })
    }

    /// Replace a department's whole hierarchy.
    ///
    /// `expected_version` is the version the client read; `None` means
    /// "whatever is current", which still fails if another writer commits
    /// between this read and the save.
    pub async fn update_department_hierarchy(
        &self,
        department_id: DepartmentId,
        proposed: HierarchyMap,
        expected_version: Option<i32>,
    ) -> CoreResult<CommittedHierarchy> {
        let stored = self.load(department_id, expected_version).await?;
        let validated = self.validate_hierarchy(&stored.members, proposed).await?;
        self.commit(stored, validated).await
    }

    /// Point `employee_id` at a new superior (or make them a root).
    pub async fn assign_superior(
        &self,
        department_id: DepartmentId,
        employee_id: EmployeeId,
        superior: Option<EmployeeId>,
        expected_version: Option<i32>,
    ) -> CoreResult<CommittedHierarchy> {
        let stored = self.load(department_id, expected_version).await?;

        if let Some(superior_id) = superior {
            validate_edge(&stored.hierarchy, employee_id, superior_id).inspect_err(|e| {
                warn!("Rejected superior change in department {department_id}: {e}");
            })?;
        }

        let mut proposed = stored.hierarchy.clone();
        proposed.insert(employee_id, superior);

        let validated = self.validate_hierarchy(&stored.members, proposed).await?;
        self.commit(stored, validated).await
    }

    /// Set a department's members. Anyone leaving is pruned from the
    /// hierarchy and their direct subordinates become roots.
    pub async fn update_department_members(
        &self,
        department_id: DepartmentId,
        members: BTreeSet<EmployeeId>,
        expected_version: Option<i32>,
    ) -> CoreResult<CommittedHierarchy> {
        let stored = self.load(department_id, expected_version).await?;
        let delta = MembershipDelta::between(&stored.members, &members);

        let version = self
            .store
            .reconcile_membership(department_id, &delta, Some(stored.version))
            .await?;

        let mut hierarchy = stored.hierarchy;
        for removed in &delta.removed {
            hierarchy.prune(removed);
        }

        info!(
            "Members of department {department_id} updated: {} added, {} removed, version {version}",
            delta.added.len(),
            delta.removed.len()
        );

        Ok(CommittedHierarchy {
            department_id,
            hierarchy,
            enrolled: BTreeSet::new(),
            version,
        })
    }

    /// Superior and direct subordinates of an employee in every department
    /// they belong to.
    pub async fn get_employee_hierarchy_view(
        &self,
        employee_id: EmployeeId,
    ) -> CoreResult<Vec<DepartmentHierarchyView>> {
        let departments = self
            .store
            .departments_of_employee(employee_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                message: format!("Employee {employee_id} not found"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let ids: Vec<EmployeeId> = departments
            .iter()
            .flat_map(|d| d.hierarchy.referenced_ids())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names = self.store.list_employee_names(&ids).await?;

        Ok(resolve(&employee_id, &departments, &names))
    }

    /// Ordered reporting forest of one department.
    pub async fn get_department_tree(&self, department_id: DepartmentId) -> CoreResult<Vec<TreeNode>> {
        let stored = self.load(department_id, None).await?;

        let ids: Vec<EmployeeId> = stored.hierarchy.referenced_ids().into_iter().collect();
        let names = self.store.list_employee_names(&ids).await?;

        Ok(build_tree(&stored.hierarchy, &names))
    }

    async fn load(
        &self,
        department_id: DepartmentId,
        expected_version: Option<i32>,
    ) -> CoreResult<StoredHierarchy> {
        let stored = self
            .store
            .get_department_hierarchy(department_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                message: format!("Department {department_id} not found"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Some(expected) = expected_version
            && expected != stored.version
        {
            return Err(CoreError::ConflictingWrite {
                current_version: stored.version,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(stored)
    }

    async fn commit(
        &self,
        stored: StoredHierarchy,
        validated: ValidatedHierarchy,
    ) -> CoreResult<CommittedHierarchy> {
        let delta = MembershipDelta::adding(validated.enrolled.clone());
        let version = self
            .store
            .save_department_hierarchy(
                stored.department_id,
                &validated.hierarchy,
                stored.version,
                &delta,
            )
            .await?;

        info!(
            "Hierarchy of department {} committed: {} entries, {} enrolled, version {}",
            stored.department_id,
            validated.hierarchy.len(),
            validated.enrolled.len(),
            version
        );

        Ok(CommittedHierarchy {
            department_id: stored.department_id,
            hierarchy: validated.hierarchy,
            enrolled: validated.enrolled,
            version,
        })
    }
}
