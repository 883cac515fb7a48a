//! Department entity - a member set plus its reporting hierarchy.

use crate::{DepartmentId, EmployeeId, HierarchyMap};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
    pub members: BTreeSet<EmployeeId>,
    pub hierarchy: HierarchyMap,
    /// Optimistic locking version, bumped on every committed write
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            members: BTreeSet::new(),
            hierarchy: HierarchyMap::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Drop a member and every hierarchy reference to them.
    pub fn remove_member(&mut self, employee_id: &EmployeeId) -> bool {
        self.hierarchy.prune(employee_id);
        self.members.remove(employee_id)
    }
}
