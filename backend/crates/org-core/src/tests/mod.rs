
use crate::{EmployeeId, HierarchyMap};

use uuid::Uuid;

/// Deterministic ids so failures are readable: `emp(1)` = `...0001`.
pub(crate) fn emp(n: u128) -> EmployeeId {
    Uuid::from_u128(n)
}

/// Build a map from `(employee, superior)` pairs.
pub(crate) fn map_of(pairs: &[(u128, Option<u128>)]) -> HierarchyMap {
    pairs
        .iter()
        .map(|(id, superior)| (emp(*id), superior.map(emp)))
        .collect()
}

/// `{A: null, B: A, C: A, D: B}`
pub(crate) const A: u128 = 0xA;
pub(crate) const B: u128 = 0xB;
pub(crate) const C: u128 = 0xC;
pub(crate) const D: u128 = 0xD;

pub(crate) fn scenario_one() -> HierarchyMap {
    map_of(&[(A, None), (B, Some(A)), (C, Some(A)), (D, Some(B))])
}
