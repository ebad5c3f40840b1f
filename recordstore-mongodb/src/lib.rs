//! MongoDB backend implementation for recordstore.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! enabling persistent record storage backed by MongoDB's document model.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! recordstore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Server-side filtering** - Equality filters run in MongoDB's query engine
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//! - **Native identifiers** - Record identities map directly onto MongoDB ObjectIds
//!
//! # Connection
//!
//! To use this backend, you need a MongoDB connection string. This can be provided
//! through the builder pattern or the [`connect`] shorthand.
//!
//! # Example
//!
//! ```ignore
//! use recordstore::{backend::StoreBackendBuilder, mongodb::MongoStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoStore::builder("mongodb://localhost:27017", "my_database")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordstore_mongodb;

pub mod store;
pub mod filter;

pub use store::{MongoStore, MongoStoreBuilder, connect};
