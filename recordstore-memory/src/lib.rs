//! In-memory record storage backend for recordstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is ideal for development
//! and testing, where standing up a real database is more ceremony than the workload merits.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Type-erased storage** - Stores records as BSON documents, one collection per type
//! - **Faithful write semantics** - Identity assignment, duplicate rejection, and
//!   upsert-by-identity behave like a document database would
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
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RecordStore::new(MemoryStore::new());
//!
//!     let user = User {
//!         id: RecordId::unassigned(),
//!         name: Some("Alice".to_string()),
//!     };
//!
//!     store.create(Some(&user)).await?;
//!     let everyone = store.read::<User>(None).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_memory;

pub mod store;
pub mod evaluator;

pub use store::{MemoryStore, MemoryStoreBuilder};
