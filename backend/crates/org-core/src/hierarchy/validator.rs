//! Cycle validation for proposed hierarchies.
//!
//! Pure functions of their input: no storage, no clock, no randomness.

use crate::hierarchy::graph::close_loop;
use crate::{CoreError, CoreResult, EmployeeId, HierarchyMap, ancestors_of};

use std::collections::HashSet;
use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;

/// Reject a candidate map that contains any supervisory loop.
///
/// Each key gets its own walk up the superior chain with a freshly
/// initialized visited set; revisiting a node within that walk is a cycle.
/// Nodes whose walk already ended at a root are recorded as settled, and
/// later walks stop as soon as they reach one, which keeps a pass linear in
/// the size of the map. Settled nodes are never treated as "seen", so
/// converging branches of an acyclic tree are accepted.
#[track_caller]
pub fn validate_full_replacement(candidate: &HierarchyMap) -> CoreResult<()> {
    let mut settled: HashSet<EmployeeId> = HashSet::with_capacity(candidate.len());

    for start in candidate.employee_ids() {
        if settled.contains(start) {
            continue;
        }

        let mut walk = vec![*start];
        let mut visited = HashSet::from([*start]);
        let mut current = *start;

        while let Some(superior) = candidate.superior_of(&current) {
            if settled.contains(&superior) {
                break;
            }
            if !visited.insert(superior) {
                let chain = close_loop(&walk, superior);
                debug!("Hierarchy rejected, cycle through {} employees", chain.len() - 1);
                return Err(CoreError::CycleDetected {
                    chain,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            walk.push(superior);
            current = superior;
        }

        settled.extend(walk);
    }

    Ok(())
}

/// Decide whether `subordinate_id` may report to `proposed_superior_id`
/// given the existing map.
///
/// Rejected when the two are the same employee, or when the subordinate is
/// already an ancestor of the proposed superior (the new edge would close a
/// loop back to the subordinate).
#[track_caller]
pub fn validate_edge(
    existing: &HierarchyMap,
    subordinate_id: EmployeeId,
    proposed_superior_id: EmployeeId,
) -> CoreResult<()> {
    if subordinate_id == proposed_superior_id {
        return Err(CoreError::CycleDetected {
            chain: vec![subordinate_id, subordinate_id],
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let ancestors = ancestors_of(existing, &proposed_superior_id)?;
    if let Some(position) = ancestors.iter().position(|id| *id == subordinate_id) {
        let mut chain = Vec::with_capacity(position + 3);
        chain.push(subordinate_id);
        chain.push(proposed_superior_id);
        chain.extend(ancestors[..=position].iter().copied());
        return Err(CoreError::CycleDetected {
            chain,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
