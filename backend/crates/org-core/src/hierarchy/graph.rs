//! Structural queries over a [`HierarchyMap`].
//!
//! An id that is not a key is a legitimate "not in this department's
//! hierarchy" state: subordinate and ancestor queries return empty results
//! for it rather than failing.

use crate::{CoreError, CoreResult, EmployeeId, HierarchyMap};

use std::cmp::Ordering;
use std::collections::HashSet;
use std::panic::Location;

use error_location::ErrorLocation;

/// Employees with no superior, ordered by `compare`.
pub fn roots_of<F>(map: &HierarchyMap, mut compare: F) -> Vec<EmployeeId>
where
    F: FnMut(&EmployeeId, &EmployeeId) -> Ordering,
{
    let mut roots: Vec<EmployeeId> = map
        .iter()
        .filter(|(_, superior)| superior.is_none())
        .map(|(id, _)| *id)
        .collect();
    roots.sort_by(|a, b| compare(a, b));
    roots
}

/// Every `x` with `map[x].superior == employee_id`, in id order.
pub fn direct_subordinates_of(map: &HierarchyMap, employee_id: &EmployeeId) -> Vec<EmployeeId> {
    map.iter()
        .filter(|(_, superior)| superior.as_ref() == Some(employee_id))
        .map(|(id, _)| *id)
        .collect()
}

/// Walk the superior chain upward, immediate superior first.
///
/// A node seen twice means the stored data already contains a loop; the walk
/// stops and reports it as `CycleDetected` instead of iterating forever.
#[track_caller]
pub fn ancestors_of(map: &HierarchyMap, employee_id: &EmployeeId) -> CoreResult<Vec<EmployeeId>> {
    let mut ancestors = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(*employee_id);

    let mut current = *employee_id;
    while let Some(superior) = map.superior_of(&current) {
        if !visited.insert(superior) {
            let mut walk = Vec::with_capacity(ancestors.len() + 1);
            walk.push(*employee_id);
            walk.extend(ancestors.iter().copied());
            return Err(CoreError::CycleDetected {
                chain: close_loop(&walk, superior),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        ancestors.push(superior);
        current = superior;
    }

    Ok(ancestors)
}

/// Cut `walk` at the first occurrence of `repeated` and close the loop.
pub(crate) fn close_loop(walk: &[EmployeeId], repeated: EmployeeId) -> Vec<EmployeeId> {
    let start = walk.iter().position(|id| *id == repeated).unwrap_or(0);
    let mut chain = walk[start..].to_vec();
    chain.push(repeated);
    chain
}
