pub mod error;
pub mod hierarchy;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use hierarchy::directory_store::{DirectoryStore, StoredHierarchy};
pub use hierarchy::graph::{ancestors_of, direct_subordinates_of, roots_of};
pub use hierarchy::hierarchy_entry_dto::{DetailedEntryDto, HierarchyEntryDto, HierarchyWire};
pub use hierarchy::hierarchy_map::HierarchyMap;
pub use hierarchy::membership_delta::MembershipDelta;
pub use hierarchy::resolver::{
    DepartmentHierarchySource, NameLookup, UNKNOWN_NAME, build_tree, display_order, resolve,
};
pub use hierarchy::service::{CommittedHierarchy, HierarchyService, ValidatedHierarchy};
pub use hierarchy::validator::{validate_edge, validate_full_replacement};
pub use hierarchy::views::{DepartmentHierarchyView, PersonRef, TreeNode};
pub use models::department::Department;
pub use models::employee::Employee;
pub use models::membership_policy::MembershipPolicy;

use uuid::Uuid;

/// Opaque identifier of an employee record.
pub type EmployeeId = Uuid;

/// Opaque identifier of a department record.
pub type DepartmentId = Uuid;
