//! Main recordstore crate providing a unified interface for record storage.
//!
//! This crate is the primary entry point for users of the recordstore framework.
//! It re-exports the core types and functionality from various sub-crates and provides
//! convenient access to different storage backends.
//!
//! # Features
//!
//! - **Type-safe record storage** - Define your data structures with Serde and store them safely
//! - **Multiple backends** - Support for in-memory and MongoDB storage with extensible trait system
//! - **Derived field tables** - `#[derive(Record)]` turns a struct's shape into its collection
//!   name, filterable fields, and identity handling
//! - **Filter-by-example reads** - Pass a partially populated record and its non-null fields
//!   become the query
//!
//! # Quick Start
//!
//! ```ignore
//! use recordstore::{memory::MemoryStore, prelude::*};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Record)]
//! pub struct User {
//!     #[record(id)]
//!     #[serde(rename = "_id")]
//!     pub id: RecordId,
//!     pub name: Option<String>,
//!     pub age: i32,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create a store over the in-memory backend
//!     let store = RecordStore::new(MemoryStore::new());
//!
//!     let user = User {
//!         id: RecordId::unassigned(),
//!         name: Some("Alice".to_string()),
//!         age: 30,
//!     };
//!
//!     // Insert the user record; User records live in the "User" collection
//!     store.create(Some(&user)).await.unwrap();
//!
//!     // Read back by example: every populated field must match
//!     let example = User {
//!         id: RecordId::unassigned(),
//!         name: Some("Alice".to_string()),
//!         age: 30,
//!     };
//!     let results = store.read(Some(&example)).await.unwrap();
//!
//!     println!("Queried users: {:?}", results);
//! }
//! ```
//!
//! # Identity and Upserts
//!
//! Every stored record carries an identifier under the reserved `_id` field. A
//! freshly constructed record holds [`RecordId::unassigned`](prelude::RecordId::unassigned);
//! the backend assigns a real identifier at insert time. `create` never reports
//! the assigned identifier back, so a record destined for further updates should
//! go through `update`, which replaces by identity, inserts when nothing matches,
//! and writes the assigned identifier back into the record:
//!
//! ```ignore
//! use recordstore::{memory::MemoryStore, prelude::*};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RecordStore::new(MemoryStore::new());
//!
//!     let mut user = User {
//!         id: RecordId::unassigned(),
//!         name: Some("Bob".to_string()),
//!         age: 39,
//!     };
//!
//!     // Nothing matches the unassigned identity, so this inserts
//!     store.update(&mut user).await.unwrap();
//!     assert!(!user.id.is_unassigned());
//!
//!     // Now the identity matches and this replaces the stored record
//!     user.age = 40;
//!     store.update(&mut user).await.unwrap();
//! }
//! ```
//!
//! Types that never declare `#[record(id)]` can still be created and read, but
//! `update` and `delete` fail fast with
//! [`StoreError::MissingIdentityField`](prelude::StoreError::MissingIdentityField).
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use recordstore_core::{record, filter, store, backend, error};

pub use recordstore_core::record::Record;
pub use recordstore_macros::Record;

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use recordstore_memory::{MemoryStore, MemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use recordstore_mongodb::{MongoStore, MongoStoreBuilder, connect};
}
