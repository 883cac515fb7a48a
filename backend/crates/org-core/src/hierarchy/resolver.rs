//! Read-side resolution of hierarchies into named, ordered views.
//!
//! Names come from an explicit [`NameLookup`] so resolution never touches
//! storage. An id without a name resolves to [`UNKNOWN_NAME`]; it never
//! aborts the rest of the view.

use crate::{
    DepartmentHierarchyView, DepartmentId, EmployeeId, HierarchyMap, PersonRef, TreeNode,
    direct_subordinates_of, roots_of,
};

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Display name used when an id cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

pub trait NameLookup {
    fn name_of(&self, employee_id: &EmployeeId) -> Option<&str>;
}

impl NameLookup for HashMap<EmployeeId, String> {
    fn name_of(&self, employee_id: &EmployeeId) -> Option<&str> {
        self.get(employee_id).map(String::as_str)
    }
}

/// A department's hierarchy plus what a view needs to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentHierarchySource {
    pub department_id: DepartmentId,
    pub department_name: String,
    pub hierarchy: HierarchyMap,
}

/// Resolve `employee_id`'s superior and direct subordinates in each of the
/// given departments. Inputs are not modified.
pub fn resolve<L: NameLookup>(
    employee_id: &EmployeeId,
    departments: &[DepartmentHierarchySource],
    names: &L,
) -> Vec<DepartmentHierarchyView> {
    departments
        .iter()
        .map(|department| {
            let superior = department
                .hierarchy
                .superior_of(employee_id)
                .map(|id| person(&id, names));

            let mut subordinates: Vec<PersonRef> =
                direct_subordinates_of(&department.hierarchy, employee_id)
                    .iter()
                    .map(|id| person(id, names))
                    .collect();
            subordinates.sort_by(compare_people);

            DepartmentHierarchyView {
                department_id: department.department_id,
                department_name: department.department_name.clone(),
                superior,
                subordinates,
            }
        })
        .collect()
}

/// Comparator for presentation: case-folded display name, then id.
pub fn display_order<L: NameLookup>(
    names: &L,
) -> impl Fn(&EmployeeId, &EmployeeId) -> Ordering + '_ {
    move |a, b| {
        sort_key(&display_name(a, names))
            .cmp(&sort_key(&display_name(b, names)))
            .then_with(|| a.cmp(b))
    }
}

/// Ordered forest for rendering. Roots and every child list follow
/// [`display_order`]. Nodes caught in a stored loop are unreachable from any
/// root and are left out rather than recursed into.
pub fn build_tree<L: NameLookup>(map: &HierarchyMap, names: &L) -> Vec<TreeNode> {
    let order = display_order(names);
    let mut visited = HashSet::with_capacity(map.len());

    roots_of(map, &order)
        .into_iter()
        .filter_map(|root| build_node(map, root, names, &order, &mut visited))
        .collect()
}

fn build_node<L, F>(
    map: &HierarchyMap,
    employee_id: EmployeeId,
    names: &L,
    order: &F,
    visited: &mut HashSet<EmployeeId>,
) -> Option<TreeNode>
where
    L: NameLookup,
    F: Fn(&EmployeeId, &EmployeeId) -> Ordering,
{
    if !visited.insert(employee_id) {
        return None;
    }

    let mut child_ids = direct_subordinates_of(map, &employee_id);
    child_ids.sort_by(|a, b| order(a, b));

    let children = child_ids
        .into_iter()
        .filter_map(|child| build_node(map, child, names, order, visited))
        .collect();

    Some(TreeNode {
        employee_id,
        name: display_name(&employee_id, names),
        children,
    })
}

fn person<L: NameLookup>(employee_id: &EmployeeId, names: &L) -> PersonRef {
    PersonRef {
        id: *employee_id,
        name: display_name(employee_id, names),
    }
}

fn display_name<L: NameLookup>(employee_id: &EmployeeId, names: &L) -> String {
    names
        .name_of(employee_id)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

fn sort_key(name: &str) -> String {
    name.to_lowercase()
}

fn compare_people(a: &PersonRef, b: &PersonRef) -> Ordering {
    sort_key(&a.name)
        .cmp(&sort_key(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
