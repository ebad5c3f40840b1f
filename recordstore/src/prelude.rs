//! Convenient re-exports of commonly used types from recordstore.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use recordstore::prelude::*;
//! ```
//!
//! This provides access to:
//! - The record trait, its derive, and record identifiers
//! - The generic record store
//! - Filter construction
//! - Store backends and builders
//! - Error types

pub use recordstore_core::{
    store::RecordStore,
    record::{Record, RecordExt, RecordId, FieldSpec, IdentitySpec},
    filter::{Filter, Predicate},
    backend::{StoreBackend, StoreBackendBuilder, ReplaceOutcome, DeleteOutcome},
    error::{StoreError, StoreResult},
};

pub use recordstore_macros::Record;
