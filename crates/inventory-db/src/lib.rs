//! # inventory-db: Database Layer for the Inventory Tracker
//!
//! This crate provides database access for the inventory tracker.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Data Flow                             │
//! │                                                                     │
//! │  Caller (list screen, edit form, ...)                               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  inventory-db (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database   │   │   Repository   │   │   Schema    │  │   │
//! │  │   │  (pool.rs)   │   │   (item.rs)    │   │ (schema.rs) │  │   │
//! │  │   │              │   │                │   │             │  │   │
//! │  │   │ SqlitePool   │◄──│ ItemRepository │   │ versioned,  │  │   │
//! │  │   │ watch chan   │   │ CRUD + live    │   │ destructive │  │   │
//! │  │   │ global()     │   │ queries        │   │ reset       │  │   │
//! │  │   └──────────────┘   └────────────────┘   └─────────────┘  │   │
//! │  │                                                             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                    SQLite Database                          │   │
//! │  │                <data_dir>/item_database                     │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, configuration, process-wide handle
//! - [`schema`] - Versioned schema bootstrap (destructive reset)
//! - [`error`] - Database error types
//! - [`repository`] - Item repository (CRUD + live queries)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_core::Item;
//! use inventory_db::{Database, DbConfig};
//! use tokio_stream::StreamExt;
//!
//! let db = Database::new(DbConfig::in_dir("./data")).await?;
//!
//! db.items().insert(&Item::new("Widget", 2.50, 10)).await?;
//!
//! let mut all = std::pin::pin!(db.items().watch_all());
//! while let Some(snapshot) = all.next().await {
//!     render(snapshot?); // re-delivered after every write
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DATABASE_FILE_NAME};

// Repository re-exports for convenience
pub use repository::item::ItemRepository;
