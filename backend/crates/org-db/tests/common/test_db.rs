use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations applied and foreign keys on.
pub async fn create_test_pool() -> SqlitePool {
    org_db::open_in_memory_pool()
        .await
        .expect("Failed to create test pool")
}
