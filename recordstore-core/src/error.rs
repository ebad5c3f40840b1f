//! Error types and result types for record store operations.
//!
//! This module provides the error taxonomy shared by every store operation.
//! Use [`StoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a record store.
///
/// Every public operation converts failures into one of these variants at its
/// own boundary; no raw driver error crosses the store API.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The target record type does not declare an identity field.
    /// Raised before any database call by operations that filter on identity.
    #[error("Record type {0} has no identity field")]
    MissingIdentityField(&'static str),
    /// A null/absent item was passed where a record was required.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The database rejected, errored on, or did not acknowledge an operation.
    /// Covers duplicate-identity violations and connectivity failures.
    #[error("Database operation failed: {0}")]
    DatabaseOperationFailed(String),
    /// Serialization/deserialization error when converting between record formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

/// A specialized `Result` type for record store operations.
///
/// This type alias is used throughout the crate to indicate operations that may fail
/// with a [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
