//! Database connection pool management.
//!
//! Connection pooling for SQLite using r2d2. Pool initialization runs the
//! embedded migrations, so a freshly opened pool always serves a current
//! schema.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use omnibus_common::{Error, Result};

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a new database pool with the given file path.
///
/// Creates the SQLite file if it doesn't exist, enables foreign key
/// constraints on every connection, and runs pending migrations.
///
/// # Example
///
/// ```no_run
/// use omnibus_db::pool::init_pool;
///
/// let pool = init_pool("/var/lib/omnibus/catalog.db").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::backend(format!("Failed to create connection pool: {}", e)))?;

    let conn = pool
        .get()
        .map_err(|e| Error::backend(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    tracing::debug!(path = db_path, "database pool ready");

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// The database is lost when the pool is dropped.
///
/// # Example
///
/// ```
/// use omnibus_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| Error::backend(format!("Failed to create in-memory pool: {}", e)))?;

    let conn = pool
        .get()
        .map_err(|e| Error::backend(format!("Failed to get connection for migrations: {}", e)))?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool.
///
/// Convenience wrapper around `pool.get()` that converts the r2d2 error into
/// the common backend-unavailable error.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::backend(format!("Failed to get connection from pool: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), 4);
    }

    #[test]
    fn test_get_conn_enables_foreign_keys() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_multiple_connections() {
        let pool = init_memory_pool().unwrap();

        let _conn1 = get_conn(&pool).unwrap();
        let _conn2 = get_conn(&pool).unwrap();
        let _conn3 = get_conn(&pool).unwrap();

        assert!(get_conn(&pool).is_ok());
    }

    #[test]
    fn test_migrations_run_on_init() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='characters'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_pool_shares_database_across_connections() {
        let pool = init_memory_pool().unwrap();

        {
            let conn = get_conn(&pool).unwrap();
            conn.execute(
                "INSERT INTO creators (title, created_at, updated_at) VALUES (?, ?, ?)",
                rusqlite::params!["Bob Kane", "", ""],
            )
            .unwrap();
        }

        let conn = get_conn(&pool).unwrap();
        let title: String = conn
            .query_row(
                "SELECT title FROM creators WHERE title = ?",
                ["Bob Kane"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(title, "Bob Kane");
    }

    #[test]
    fn test_file_pool_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        {
            let pool = init_pool(&db_path_str).unwrap();
            let conn = get_conn(&pool).unwrap();
            conn.execute(
                "INSERT INTO teams (title, created_at, updated_at) VALUES (?, ?, ?)",
                rusqlite::params!["Titans", "", ""],
            )
            .unwrap();
        }

        let pool = init_pool(&db_path_str).unwrap();
        let conn = get_conn(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
