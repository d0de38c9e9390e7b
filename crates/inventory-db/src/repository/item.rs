//! # Item Repository
//!
//! Database operations for items: CRUD plus two live queries.
//!
//! ## How Live Queries Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Live Query Mechanism                            │
//! │                                                                     │
//! │  insert / update / delete (row actually changed)                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  data_version watch channel: 41 → 42                                │
//! │       │                                                             │
//! │       ├──────────────────────┐                                      │
//! │       ▼                      ▼                                      │
//! │  watch_all()            watch_item(7)                               │
//! │  re-runs:               re-runs:                                    │
//! │  SELECT ... ORDER BY    SELECT ... WHERE id = 7                     │
//! │  name ASC                                                           │
//! │       │                      │                                      │
//! │       ▼                      ▼                                      │
//! │  yields Vec<Item>       yields Option<Item>                         │
//! │                                                                     │
//! │  The watch channel keeps only the LATEST version: a subscriber      │
//! │  that falls behind skips intermediate states and re-queries once    │
//! │  against the newest commit.                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes that match no row (ignored duplicate insert, update/delete of a
//! missing id) do not bump the version, so subscribers are not woken for
//! non-changes.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::error::DbResult;
use inventory_core::{Item, UNASSIGNED_ID};

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
///
/// repo.insert(&Item::new("Widget", 2.50, 10)).await?;
///
/// let mut stream = std::pin::pin!(repo.watch_all());
/// while let Some(snapshot) = stream.next().await {
///     render(snapshot?);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
    data_version: Arc<watch::Sender<u64>>,
}

impl ItemRepository {
    /// Creates a new ItemRepository sharing the database's change notifier.
    pub(crate) fn new(pool: SqlitePool, data_version: Arc<watch::Sender<u64>>) -> Self {
        ItemRepository { pool, data_version }
    }

    /// Inserts a new item.
    ///
    /// ## Id Assignment
    /// An item with `id == UNASSIGNED_ID` (0) gets the next unused
    /// auto-incremented id. A non-zero id is honored as-is.
    ///
    /// ## Conflict Policy
    /// If the id already exists the new row is silently discarded
    /// (ignore-on-conflict). The existing row is left untouched and no
    /// error is raised.
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, name = %item.name, "Inserting item");

        // A NULL primary key makes SQLite assign the next id
        let id = (item.id != UNASSIGNED_ID).then_some(item.id);

        let result = sqlx::query(
            "INSERT OR IGNORE INTO items (id, name, price, quantity) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            self.notify_changed();
        }

        Ok(())
    }

    /// Updates an existing item, replacing every field of the matching row.
    ///
    /// ## Behavior
    /// Full-row replace by id, never a partial merge. When no row matches
    /// the id this is a no-op, not an error.
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, "Updating item");

        let result =
            sqlx::query("UPDATE items SET name = ?2, price = ?3, quantity = ?4 WHERE id = ?1")
                .bind(item.id)
                .bind(&item.name)
                .bind(item.price)
                .bind(item.quantity)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() > 0 {
            self.notify_changed();
        }

        Ok(())
    }

    /// Deletes the row matching the item's id.
    ///
    /// ## Behavior
    /// When no row matches the id this is a no-op, not an error.
    pub async fn delete(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(item.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            self.notify_changed();
        }

        Ok(())
    }

    /// Gets an item by id (one-shot read).
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get(&self, id: i64) -> DbResult<Option<Item>> {
        fetch_item(&self.pool, id).await
    }

    /// Lists all items sorted by name (one-shot read).
    pub async fn all(&self) -> DbResult<Vec<Item>> {
        fetch_all(&self.pool).await
    }

    /// Counts stored items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Live query: the row with the given id.
    ///
    /// ## Emission Contract
    /// Emits the current row immediately, then re-emits whenever the table
    /// changes. Yields `None` while no row matches (including after a
    /// delete). The stream never ends on its own; dropping it
    /// unsubscribes and releases its resources.
    pub fn watch_item(&self, id: i64) -> impl Stream<Item = DbResult<Option<Item>>> + Send {
        let pool = self.pool.clone();

        WatchStream::new(self.data_version.subscribe()).then(move |_version| {
            let pool = pool.clone();
            async move { fetch_item(&pool, id).await }
        })
    }

    /// Live query: the full table, sorted ascending by name.
    ///
    /// ## Emission Contract
    /// Emits the current snapshot immediately, then a fresh snapshot after
    /// every insert/update/delete that changed the table. Sorting uses the
    /// engine's default BINARY collation (case-sensitive). The stream
    /// never ends on its own; dropping it unsubscribes.
    pub fn watch_all(&self) -> impl Stream<Item = DbResult<Vec<Item>>> + Send {
        let pool = self.pool.clone();

        WatchStream::new(self.data_version.subscribe()).then(move |_version| {
            let pool = pool.clone();
            async move { fetch_all(&pool).await }
        })
    }

    /// Bumps the data version, waking every live-query subscriber.
    ///
    /// Called only after a write that actually changed a row committed.
    fn notify_changed(&self) {
        self.data_version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

// =============================================================================
// Query Helpers
// =============================================================================
// Free functions so the live-query closures can run them without borrowing
// the repository.

async fn fetch_item(pool: &SqlitePool, id: i64) -> DbResult<Option<Item>> {
    let item =
        sqlx::query_as::<_, Item>("SELECT id, name, price, quantity FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(item)
}

async fn fetch_all(pool: &SqlitePool) -> DbResult<Vec<Item>> {
    let items =
        sqlx::query_as::<_, Item>("SELECT id, name, price, quantity FROM items ORDER BY name ASC")
            .fetch_all(pool)
            .await?;

    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_distinct_ids() {
        let repo = test_db().await.items();

        repo.insert(&Item::new("Widget", 2.50, 10)).await.unwrap();
        repo.insert(&Item::new("Bolt", 0.10, 500)).await.unwrap();

        let items = repo.all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.id > 0));
        assert_ne!(items[0].id, items[1].id);
    }

    #[tokio::test]
    async fn test_insert_honors_caller_supplied_id() {
        let repo = test_db().await.items();

        repo.insert(&Item::new("Widget", 2.50, 10).with_id(42))
            .await
            .unwrap();

        assert!(repo.get(42).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_ignores_duplicate_id() {
        let repo = test_db().await.items();

        repo.insert(&Item::new("Widget", 2.50, 10).with_id(1))
            .await
            .unwrap();

        // Same id, different content: must neither error nor overwrite
        repo.insert(&Item::new("Bolt", 0.10, 500).with_id(1))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let kept = repo.get(1).await.unwrap().unwrap();
        assert_eq!(kept.name, "Widget");
        assert_eq!(kept.quantity, 10);
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let repo = test_db().await.items();

        repo.insert(&Item::new("Widget", 2.50, 10).with_id(1))
            .await
            .unwrap();
        repo.update(&Item::new("Gadget", 3.75, 4).with_id(1))
            .await
            .unwrap();

        let item = repo.get(1).await.unwrap().unwrap();
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.price, 3.75);
        assert_eq!(item.quantity, 4);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let repo = test_db().await.items();

        repo.update(&Item::new("Ghost", 1.0, 1).with_id(99))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let repo = test_db().await.items();

        repo.delete(&Item::new("Ghost", 1.0, 1).with_id(99))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_watch_all_emits_sorted_snapshots() {
        let repo = test_db().await.items();

        let stream = repo.watch_all();
        tokio::pin!(stream);

        // Initial emission: empty table
        let snapshot = stream.next().await.unwrap().unwrap();
        assert!(snapshot.is_empty());

        repo.insert(&Item::new("Widget", 2.50, 10)).await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(names(&snapshot), ["Widget"]);

        repo.insert(&Item::new("Bolt", 0.10, 500)).await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(names(&snapshot), ["Bolt", "Widget"]);

        // Update Bolt's quantity; next emission reflects it and only it
        let bolt = snapshot[0].clone();
        repo.update(&Item { quantity: 400, ..bolt }).await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(names(&snapshot), ["Bolt", "Widget"]);
        assert_eq!(snapshot[0].quantity, 400);
        assert_eq!(snapshot[1].quantity, 10);

        // Delete Widget; next emission drops it
        let widget = snapshot[1].clone();
        repo.delete(&widget).await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(names(&snapshot), ["Bolt"]);
    }

    #[tokio::test]
    async fn test_watch_item_tracks_updates_and_delete() {
        let repo = test_db().await.items();

        repo.insert(&Item::new("Bolt", 0.10, 500)).await.unwrap();
        let bolt = repo.all().await.unwrap().remove(0);

        let stream = repo.watch_item(bolt.id);
        tokio::pin!(stream);

        let current = stream.next().await.unwrap().unwrap().unwrap();
        assert_eq!(current.quantity, 500);

        repo.update(&Item { quantity: 400, ..bolt.clone() })
            .await
            .unwrap();
        let current = stream.next().await.unwrap().unwrap().unwrap();
        assert_eq!(current.quantity, 400);

        repo.delete(&bolt).await.unwrap();
        let current = stream.next().await.unwrap().unwrap();
        assert!(current.is_none());
    }

    #[tokio::test]
    async fn test_watch_item_absent_id_yields_none() {
        let repo = test_db().await.items();

        let stream = repo.watch_item(7);
        tokio::pin!(stream);

        assert!(stream.next().await.unwrap().unwrap().is_none());
    }
}
