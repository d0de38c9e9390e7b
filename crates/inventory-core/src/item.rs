//! # Item Entity
//!
//! The sole persisted entity of the inventory tracker. One `Item` value
//! corresponds to one row of the `items` table.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Item Identity Rules                          │
//! │                                                                     │
//! │  id == 0 (UNASSIGNED_ID)                                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Storage engine assigns the next unused positive id on insert       │
//! │                                                                     │
//! │  id != 0                                                            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Honored as-is; if the id already exists the insert is silently     │
//! │  discarded (ignore-on-conflict), never an overwrite                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Sentinel id meaning "not yet persisted".
///
/// Inserting an item with this id asks the storage engine to assign a
/// fresh auto-incremented id.
pub const UNASSIGNED_ID: i64 = 0;

/// A single inventory item.
///
/// Values handed out by the store are immutable snapshots; mutating a
/// snapshot has no effect on storage until it is passed back through an
/// update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Primary key. `UNASSIGNED_ID` until the store assigns one.
    pub id: i64,

    /// Display name shown in the inventory list.
    pub name: String,

    /// Unit price. Not validated by the store (negative/zero allowed).
    pub price: f64,

    /// Units in stock. Not validated by the store.
    pub quantity: i64,
}

impl Item {
    /// Creates a new, not-yet-persisted item.
    ///
    /// ## Example
    /// ```rust
    /// use inventory_core::{Item, UNASSIGNED_ID};
    ///
    /// let item = Item::new("Widget", 2.50, 10);
    /// assert_eq!(item.id, UNASSIGNED_ID);
    /// ```
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Item {
            id: UNASSIGNED_ID,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns the same item with an explicit id.
    ///
    /// ## Usage
    /// Building an item whose id is already known (tests, callers that
    /// manage their own ids).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Whether the store has assigned this item an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_unassigned() {
        let item = Item::new("Widget", 2.50, 10);
        assert_eq!(item.id, UNASSIGNED_ID);
        assert!(!item.is_persisted());
        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 10);
    }

    #[test]
    fn test_with_id() {
        let item = Item::new("Bolt", 0.10, 500).with_id(7);
        assert_eq!(item.id, 7);
        assert!(item.is_persisted());
    }

    #[test]
    fn test_item_serializes_flat() {
        let item = Item::new("Widget", 2.50, 10).with_id(1);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Widget","price":2.5,"quantity":10}"#
        );
    }
}
