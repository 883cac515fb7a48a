//! Canonical in-memory form of one department's reporting structure.
//!
//! Only superior pointers are stored. Subordinate lists are always derived
//! (see [`crate::direct_subordinates_of`]), so the two views cannot drift.

use crate::{CoreError, CoreResult, EmployeeId, HierarchyEntryDto, HierarchyWire};

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mapping employee id -> superior id (or `None` for a root).
///
/// Every referenced superior is also a key, so the key set is exactly the
/// set of employees placed in the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<EmployeeId, Option<EmployeeId>>")]
#[serde(into = "BTreeMap<EmployeeId, Option<EmployeeId>>")]
pub struct HierarchyMap {
    entries: BTreeMap<EmployeeId, Option<EmployeeId>>,
}

impl HierarchyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `employee_id`'s superior, adding the superior as a root if it is
    /// not placed yet. Returns the previous superior when the key existed.
    pub fn insert(
        &mut self,
        employee_id: EmployeeId,
        superior: Option<EmployeeId>,
    ) -> Option<Option<EmployeeId>> {
        if let Some(superior_id) = superior {
            self.entries.entry(superior_id).or_insert(None);
        }
        self.entries.insert(employee_id, superior)
    }

    pub fn superior_of(&self, employee_id: &EmployeeId) -> Option<EmployeeId> {
        self.entries.get(employee_id).copied().flatten()
    }

    pub fn contains(&self, employee_id: &EmployeeId) -> bool {
        self.entries.contains_key(employee_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending id order.
    pub fn employee_ids(&self) -> impl Iterator<Item = &EmployeeId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EmployeeId, &Option<EmployeeId>)> {
        self.entries.iter()
    }

    /// Remove an employee: their entry goes away and their direct
    /// subordinates become roots. Returns whether anything changed.
    pub fn prune(&mut self, employee_id: &EmployeeId) -> bool {
        let mut changed = self.entries.remove(employee_id).is_some();
        for superior in self.entries.values_mut() {
            if *superior == Some(*employee_id) {
                *superior = None;
                changed = true;
            }
        }
        changed
    }

    /// Every employee named anywhere in the map.
    pub fn referenced_ids(&self) -> BTreeSet<EmployeeId> {
        self.entries
            .iter()
            .flat_map(|(id, superior)| std::iter::once(*id).chain(*superior))
            .collect()
    }

    /// Normalize the wire form (bare superior or `{superior, subordinates}`
    /// per key) into the canonical map.
    ///
    /// Subordinate lists are folded into superior pointers. A subordinate that
    /// names a different superior, or is claimed by two entries, is rejected.
    #[track_caller]
    pub fn from_wire(wire: &HierarchyWire) -> CoreResult<Self> {
        let mut stated: BTreeMap<EmployeeId, Option<EmployeeId>> = BTreeMap::new();
        let mut claims: BTreeMap<EmployeeId, EmployeeId> = BTreeMap::new();

        for (key, entry) in wire {
            let employee_id = parse_employee_id(key)?;
            let (superior, subordinates) = match entry {
                HierarchyEntryDto::Bare(superior) => (superior.as_deref(), &[][..]),
                HierarchyEntryDto::Detailed(detailed) => (
                    detailed.superior.as_deref(),
                    detailed.subordinates.as_slice(),
                ),
            };

            let superior = superior
                .filter(|s| !s.is_empty())
                .map(parse_employee_id)
                .transpose()?;
            stated.insert(employee_id, superior);

            for raw in subordinates {
                let subordinate_id = parse_employee_id(raw)?;
                match claims.entry(subordinate_id) {
                    Entry::Vacant(slot) => {
                        slot.insert(employee_id);
                    }
                    Entry::Occupied(slot) if *slot.get() != employee_id => {
                        return Err(CoreError::InconsistentEntry {
                            employee_id: subordinate_id,
                            stated_superior: Some(*slot.get()),
                            claimed_by: employee_id,
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        for (subordinate_id, claimed_by) in claims {
            match stated.get(&subordinate_id).copied().flatten() {
                Some(superior) if superior != claimed_by => {
                    return Err(CoreError::InconsistentEntry {
                        employee_id: subordinate_id,
                        stated_superior: Some(superior),
                        claimed_by,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                _ => {
                    stated.insert(subordinate_id, Some(claimed_by));
                }
            }
        }

        Ok(stated.into_iter().collect())
    }

    /// Bare wire form: `{"<id>": "<superior id>" | null}`.
    pub fn to_wire(&self) -> HierarchyWire {
        self.entries
            .iter()
            .map(|(id, superior)| {
                (
                    id.to_string(),
                    HierarchyEntryDto::Bare(superior.map(|s| s.to_string())),
                )
            })
            .collect()
    }
}

impl FromIterator<(EmployeeId, Option<EmployeeId>)> for HierarchyMap {
    fn from_iter<I: IntoIterator<Item = (EmployeeId, Option<EmployeeId>)>>(iter: I) -> Self {
        let mut map = HierarchyMap::new();
        for (employee_id, superior) in iter {
            map.insert(employee_id, superior);
        }
        map
    }
}

impl From<BTreeMap<EmployeeId, Option<EmployeeId>>> for HierarchyMap {
    fn from(entries: BTreeMap<EmployeeId, Option<EmployeeId>>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<HierarchyMap> for BTreeMap<EmployeeId, Option<EmployeeId>> {
    fn from(map: HierarchyMap) -> Self {
        map.entries
    }
}

#[track_caller]
fn parse_employee_id(raw: &str) -> CoreResult<EmployeeId> {
    Uuid::parse_str(raw).map_err(|e| CoreError::Validation {
        message: format!("Invalid employee id '{raw}' in hierarchy: {e}"),
        field: Some("hierarchy".into()),
        location: ErrorLocation::from(Location::caller()),
    })
}
