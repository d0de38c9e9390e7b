//! # inventory-core: Pure Domain Types for the Inventory Tracker
//!
//! This crate contains the domain model shared by every layer of the
//! inventory tracker, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Architecture                          │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation Layer (out of scope)              │   │
//! │  │    item list screen ──► item detail ──► edit form           │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │             ★ inventory-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │           Item { id, name, price, quantity }                │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE TYPES            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               inventory-db (Database Layer)                 │   │
//! │  │         SQLite queries, schema, item repository             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - The `Item` entity
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not handles**: an `Item` value is an immutable snapshot
//!    with no back-reference to storage
//! 2. **No validation here**: the store persists whatever it is given;
//!    price and quantity ranges are a presentation concern
//! 3. **No I/O**: database, network, file system access is FORBIDDEN here

pub mod item;

pub use item::{Item, UNASSIGNED_ID};
