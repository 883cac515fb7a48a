//! Employee entity - a person who can belong to several departments.

use crate::{DepartmentId, EmployeeId};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Unique across all employees
    pub email: String,
    /// Mirrors the department member sets; both read the same membership rows
    pub departments: BTreeSet<DepartmentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(name: String, email: String, departments: BTreeSet<DepartmentId>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            departments,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn belongs_to(&self, department_id: &DepartmentId) -> bool {
        self.departments.contains(department_id)
    }
}
