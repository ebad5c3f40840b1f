//! Storage backend abstraction for the record store.
//!
//! This module defines the trait that abstracts over storage implementations,
//! allowing the record store to work with different backends (in-memory,
//! MongoDB, etc.).
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface for the five
//! operations the store dispatches: single insert, batch insert, filtered
//! find, replace-with-upsert, and single delete. Backends operate on raw BSON
//! documents plus a collection name so they stay independent of caller record
//! types. Implementations are required to be thread-safe (`Send + Sync`) and
//! to map every driver failure into a [`StoreError`](crate::error::StoreError)
//! at their own boundary.
//!
//! # Identity handling
//!
//! Backends own identifier assignment: before persisting, a document whose
//! identity entry is missing, null, or the unassigned sentinel receives a
//! fresh identifier (see
//! [`ensure_document_identity`](crate::record::ensure_document_identity)).
//! [`StoreBackend::replace_one`] reports the assigned identifier through
//! [`ReplaceOutcome::upserted_id`] when the upsert inserted a new document,
//! which is what lets the store reconcile a caller's record in place.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::StoreResult, filter::Filter, record::RecordId};

/// Outcome of a replace-with-upsert call.
#[derive(Debug, Clone, Default)]
pub struct ReplaceOutcome {
    /// Whether the database acknowledged the write.
    pub acknowledged: bool,
    /// Identifier assigned by the database when the replace inserted a new
    /// document instead of matching an existing one. `None` when an existing
    /// document was replaced.
    pub upserted_id: Option<RecordId>,
}

/// Outcome of a single-delete call.
#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    /// Whether the database acknowledged the write.
    pub acknowledged: bool,
    /// Number of documents removed; zero or one.
    pub deleted_count: u64,
}

/// Abstract interface for record storage backends.
///
/// Implementers provide concrete storage strategies behind the five
/// operations the store needs. All methods are async and safe for concurrent
/// use from multiple tasks; the exact concurrency model is
/// implementation-specific.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). A
/// rejected write (including a duplicate identity) surfaces as
/// [`StoreError::DatabaseOperationFailed`](crate::error::StoreError::DatabaseOperationFailed);
/// no raw driver error escapes a backend.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts one document into a collection.
    ///
    /// Fails if the collection already holds a document with the same
    /// identity. The collection is created on first use if the underlying
    /// database requires it.
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<()>;

    /// Inserts a batch of documents into a collection in one call.
    ///
    /// Atomicity follows the underlying database's batch-insert semantics;
    /// backends reject the batch when any document's identity collides with
    /// an existing document or with another batch member.
    async fn insert_many(&self, documents: Vec<Document>, collection: &str) -> StoreResult<()>;

    /// Returns all documents in a collection matching `filter`, in the
    /// database's natural order.
    ///
    /// A match-all filter returns the whole collection. No match yields an
    /// empty vector, not an error.
    async fn find(&self, filter: Filter, collection: &str) -> StoreResult<Vec<Document>>;

    /// Replaces the first document matching `filter` with `document`,
    /// inserting `document` when nothing matches.
    ///
    /// The outcome carries the newly assigned identifier when the call
    /// inserted rather than replaced.
    async fn replace_one(
        &self,
        filter: Filter,
        document: Document,
        collection: &str,
    ) -> StoreResult<ReplaceOutcome>;

    /// Deletes at most one document matching `filter`.
    ///
    /// Deleting from a missing collection or matching nothing is not an
    /// error; the outcome reports a zero count.
    async fn delete_one(&self, filter: Filter, collection: &str) -> StoreResult<DeleteOutcome>;
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<()> {
        (*self)
            .insert_one(document, collection)
            .await
    }

    async fn insert_many(&self, documents: Vec<Document>, collection: &str) -> StoreResult<()> {
        (*self)
            .insert_many(documents, collection)
            .await
    }

    async fn find(&self, filter: Filter, collection: &str) -> StoreResult<Vec<Document>> {
        (*self).find(filter, collection).await
    }

    async fn replace_one(
        &self,
        filter: Filter,
        document: Document,
        collection: &str,
    ) -> StoreResult<ReplaceOutcome> {
        (*self)
            .replace_one(filter, document, collection)
            .await
    }

    async fn delete_one(&self, filter: Filter, collection: &str) -> StoreResult<DeleteOutcome> {
        (*self)
            .delete_one(filter, collection)
            .await
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
