//! # Schema Bootstrap
//!
//! Versioned schema creation with destructive reset.
//!
//! ## How the Version Check Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Bootstrap Process                              │
//! │                                                                     │
//! │  Database::new()                                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Read PRAGMA user_version                                           │
//! │       │                                                             │
//! │       ├── == SCHEMA_VERSION? Nothing to do                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Mismatch (0 on a fresh file, or an older/newer schema)             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DROP TABLE items → CREATE TABLE items → stamp user_version         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Store is ready                                                     │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Changing the Schema
//!
//! 1. Edit `CREATE_ITEMS_TABLE`
//! 2. Bump `SCHEMA_VERSION`
//!
//! There are no row migrations. A version mismatch at open time drops and
//! recreates the table, discarding all stored items. That data loss is part
//! of this component's contract, not an accident.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};

/// Current schema version, stamped into `PRAGMA user_version`.
///
/// Bump this whenever the shape of the `items` table changes.
pub const SCHEMA_VERSION: i64 = 1;

/// DDL for the single `items` table.
///
/// `AUTOINCREMENT` keeps assigned ids monotonic: a deleted item's id is
/// never handed out again.
const CREATE_ITEMS_TABLE: &str = "\
CREATE TABLE items (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL,
    price    REAL    NOT NULL,
    quantity INTEGER NOT NULL
)";

/// Ensures the schema matches [`SCHEMA_VERSION`], resetting storage if not.
///
/// ## Safety
/// - Idempotent: a second call on an up-to-date database does nothing
/// - Destructive: on version mismatch ALL stored items are dropped
///
/// ## Example
/// ```rust,ignore
/// ensure_schema(&pool).await?;
/// ```
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    ensure_schema_at(pool, SCHEMA_VERSION).await
}

/// Version-parameterized bootstrap, split out so tests can simulate a
/// schema bump without editing the constant.
async fn ensure_schema_at(pool: &SqlitePool, version: i64) -> DbResult<()> {
    let stored = stored_version(pool).await?;

    if stored == version {
        debug!(version, "Schema is current");
        return Ok(());
    }

    if stored == 0 {
        info!(version, "Creating schema on fresh database");
    } else {
        warn!(
            stored,
            version, "Schema version mismatch, dropping all stored items"
        );
    }

    sqlx::query("DROP TABLE IF EXISTS items")
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    sqlx::query(CREATE_ITEMS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    // PRAGMA does not accept bind parameters
    sqlx::query(&format!("PRAGMA user_version = {version}"))
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    info!(version, "Schema ready");
    Ok(())
}

/// Returns the schema version stored in the database file.
///
/// ## Usage
/// For diagnostics and health checks. A fresh file reports 0.
pub async fn stored_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    Ok(version)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use inventory_core::Item;

    #[tokio::test]
    async fn test_fresh_bootstrap_stamps_version() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(stored_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.items().insert(&Item::new("Widget", 2.50, 10)).await.unwrap();

        // Second run on a current schema must not touch the data
        ensure_schema(db.pool()).await.unwrap();

        assert_eq!(db.items().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_version_bump_drops_stored_items() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::in_dir(dir.path());

        let db = Database::new(config.clone()).await.unwrap();
        db.items().insert(&Item::new("Widget", 2.50, 10)).await.unwrap();
        assert_eq!(db.items().count().await.unwrap(), 1);
        db.close().await;

        // Reopen the same file as if the compiled schema had moved on
        let db = Database::new(config.bootstrap_schema(false)).await.unwrap();
        ensure_schema_at(db.pool(), SCHEMA_VERSION + 1).await.unwrap();

        assert_eq!(db.items().count().await.unwrap(), 0);
        assert_eq!(stored_version(db.pool()).await.unwrap(), SCHEMA_VERSION + 1);
    }
}
