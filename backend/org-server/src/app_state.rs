use org_core::{HierarchyService, MembershipPolicy};
use org_db::SqliteDirectoryStore;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub hierarchy: Arc<HierarchyService<SqliteDirectoryStore>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, membership_policy: MembershipPolicy) -> Self {
        let store = SqliteDirectoryStore::new(pool.clone());
        Self {
            pool,
            hierarchy: Arc::new(HierarchyService::new(store, membership_policy)),
        }
    }
}
