//! # Database Pool Management
//!
//! Connection pool creation, configuration, and the process-wide handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Database Connection Pool                         │
//! │                                                                     │
//! │  App Startup                                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DbConfig::in_dir(data_dir) ← Configure pool settings               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Database::new(config).await ← Create pool + bootstrap schema       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────┐                        │
//! │  │            SqlitePool                   │                        │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐        │  (max_connections)     │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...    │                        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘        │                        │
//! │  └─────────────────────────────────────────┘                        │
//! │       │                                                             │
//! │       │ Concurrent access from any task                             │
//! │       ▼                                                             │
//! │  Caller 1 ──► uses Conn1                                            │
//! │  Caller 2 ──► uses Conn2                                            │
//! │  (The engine serializes conflicting writes internally)              │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, OnceCell};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::item::ItemRepository;
use crate::schema;

/// Canonical file name of the backing database.
///
/// Kept stable so existing data files remain readable across releases.
pub const DATABASE_FILE_NAME: &str = "item_database";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/item_database")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local single-process app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run the schema bootstrap on connect.
    /// Default: true
    pub bootstrap_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given file path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it
    ///   doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            bootstrap_schema: true,
        }
    }

    /// Creates a configuration pointing at the canonical database file
    /// ([`DATABASE_FILE_NAME`]) inside a data directory.
    ///
    /// ## Usage
    /// This is how application shells derive the store location from their
    /// platform data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        DbConfig::new(dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run the schema bootstrap on connect.
    pub fn bootstrap_schema(mut self, run: bool) -> Self {
        self.bootstrap_schema = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = DbConfig::in_memory();
    /// let db = Database::new(config).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            bootstrap_schema: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: clones share the same pool and the same change
/// notifier, so live queries obtained from any clone observe writes made
/// through every other clone.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Data-version counter, bumped after every committed write that
    /// changed a row. Live queries subscribe to this.
    data_version: Arc<watch::Sender<u64>>,
}

/// Process-wide handle for [`Database::global`].
static GLOBAL: OnceCell<Database> = OnceCell::const_new();

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    /// 3. Creates the connection pool
    /// 4. Bootstraps the schema (if enabled), destructively resetting it
    ///    on a version mismatch
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection or bootstrap failed
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::in_dir("./data");
    /// let db = Database::new(config).await?;
    /// ```
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers, writers don't block readers
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: data is safe from corruption, may lose
            // the last transaction on a crash
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let (data_version, _) = watch::channel(0u64);

        let db = Database {
            pool,
            data_version: Arc::new(data_version),
        };

        if config.bootstrap_schema {
            schema::ensure_schema(&db.pool).await?;
        }

        Ok(db)
    }

    /// Returns the process-wide database handle, creating it on first call.
    ///
    /// ## Initialization Contract
    /// The first caller builds the backing file
    /// (`<data_dir>/item_database`) and publishes the handle; every later
    /// call, from any thread, returns that same handle. Construction is
    /// guarded so that exactly one database is ever created, even when
    /// multiple tasks race on first access. `data_dir` is only read on the
    /// call that wins initialization.
    ///
    /// ## When NOT To Use
    /// Prefer constructing a [`Database`] at the composition root and
    /// passing it down. This accessor exists for shells that have no
    /// injection seam.
    pub async fn global(data_dir: impl AsRef<Path>) -> DbResult<&'static Database> {
        let config = DbConfig::in_dir(data_dir);

        GLOBAL
            .get_or_try_init(|| async move { Database::new(config).await })
            .await
    }

    /// Returns a reference to the connection pool.
    ///
    /// ## Usage
    /// For advanced queries not covered by the repository.
    /// Prefer using repository methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the item repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// db.items().insert(&Item::new("Widget", 2.50, 10)).await?;
    /// ```
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone(), Arc::clone(&self.data_version))
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail. Live
    /// queries start yielding errors on their next re-run.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let config = DbConfig::in_memory();
        let db = Database::new(config).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[test]
    fn test_in_dir_appends_canonical_file_name() {
        let config = DbConfig::in_dir("/var/data");

        assert_eq!(
            config.database_path,
            PathBuf::from("/var/data").join(DATABASE_FILE_NAME)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_global_initializes_exactly_once() {
        let dir = tempfile::tempdir().unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let path = dir.path().to_path_buf();
            handles.push(tokio::spawn(async move {
                let db = Database::global(path).await.unwrap();
                db as *const Database as usize
            }));
        }

        let mut addresses = Vec::new();
        for handle in handles {
            addresses.push(handle.await.unwrap());
        }

        // Every task observed the identical instance
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
