//! A generic record-store access layer that provides uniform CRUD operations over document databases.
//!
//! This crate is the core of the recordstore project and provides:
//!
//! - **Record traits** ([`record`]) - Core traits for describing record types and their identity
//! - **Filter construction** ([`filter`]) - Deterministic equality filters derived from record values
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing different storage backends
//! - **Record store** ([`store`]) - Main interface performing generic create/read/update/delete dispatch
//! - **Error handling** ([`error`]) - Error types and result types shared by every operation
//!
//! # Example
//!
//! ```ignore
//! use recordstore::prelude::*;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Record)]
//! pub struct User {
//!     #[record(id)]
//!     #[serde(rename = "_id")]
//!     pub id: RecordId,
//!     pub name: Option<String>,
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_core;

pub mod backend;
pub mod error;
pub mod filter;
pub mod record;
pub mod store;
