use crate::EmployeeId;

use std::collections::BTreeSet;

/// Members to add to / remove from one department.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDelta {
    pub added: BTreeSet<EmployeeId>,
    pub removed: BTreeSet<EmployeeId>,
}

impl MembershipDelta {
    /// Difference needed to turn `current` into `target`.
    pub fn between(current: &BTreeSet<EmployeeId>, target: &BTreeSet<EmployeeId>) -> Self {
        Self {
            added: target.difference(current).copied().collect(),
            removed: current.difference(target).copied().collect(),
        }
    }

    pub fn adding(added: BTreeSet<EmployeeId>) -> Self {
        Self {
            added,
            removed: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// `current` with the delta applied.
    pub fn apply_to(&self, current: &BTreeSet<EmployeeId>) -> BTreeSet<EmployeeId> {
        current
            .difference(&self.removed)
            .chain(self.added.iter())
            .copied()
            .collect()
    }
}
