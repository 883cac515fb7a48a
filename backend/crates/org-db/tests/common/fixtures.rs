use org_core::{Department, DepartmentId, Employee, EmployeeId, HierarchyMap};
use org_db::{DepartmentRepository, EmployeeRepository};

use std::collections::BTreeSet;

use sqlx::SqlitePool;

/// Employee with a unique email and no departments.
pub fn test_employee(name: &str) -> Employee {
    let employee = Employee::new(name.to_string(), String::new(), BTreeSet::new());
    Employee {
        email: format!("{}-{}@example.com", name.to_lowercase(), employee.id),
        ..employee
    }
}

pub async fn insert_employee(pool: &SqlitePool, name: &str) -> EmployeeId {
    let employee = test_employee(name);
    EmployeeRepository::new(pool.clone())
        .create(&employee)
        .await
        .expect("Failed to create test employee");
    employee.id
}

pub async fn insert_department(
    pool: &SqlitePool,
    name: &str,
    members: &[EmployeeId],
    hierarchy: HierarchyMap,
) -> DepartmentId {
    let mut department = Department::new(name.to_string(), None);
    department.members = members.iter().copied().collect();
    department.hierarchy = hierarchy;
    DepartmentRepository::new(pool.clone())
        .create(&department)
        .await
        .expect("Failed to create test department");
    department.id
}

/// `{a: null, b: a, c: a, d: b}`
pub fn four_person_hierarchy(ids: &[EmployeeId; 4]) -> HierarchyMap {
    let [a, b, c, d] = *ids;
    [(a, None), (b, Some(a)), (c, Some(a)), (d, Some(b))]
        .into_iter()
        .collect()
}

/// Four employees in one department arranged as [`four_person_hierarchy`].
pub async fn seed_department(pool: &SqlitePool) -> (DepartmentId, [EmployeeId; 4]) {
    let ids = [
        insert_employee(pool, "Alice").await,
        insert_employee(pool, "Bob").await,
        insert_employee(pool, "Carol").await,
        insert_employee(pool, "Dave").await,
    ];
    let department = insert_department(pool, "Engineering", &ids, four_person_hierarchy(&ids)).await;
    (department, ids)
}
