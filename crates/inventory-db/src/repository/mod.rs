//! # Repository Module
//!
//! Database repository implementations for the inventory tracker.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Repository Pattern Explained                       │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API.                                                               │
//! │                                                                     │
//! │  Caller (presentation layer)                                        │
//! │       │                                                             │
//! │       │  db.items().insert(&item)                                   │
//! │       ▼                                                             │
//! │  ItemRepository                                                     │
//! │  ├── insert(&self, item)                                            │
//! │  ├── update(&self, item)                                            │
//! │  ├── delete(&self, item)                                            │
//! │  ├── watch_item(&self, id)   ← live query                           │
//! │  └── watch_all(&self)        ← live query                           │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • Clean separation of concerns                                     │
//! │  • SQL is isolated in one place                                     │
//! │  • Easy to test against an in-memory database                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Item CRUD and live queries

pub mod item;
