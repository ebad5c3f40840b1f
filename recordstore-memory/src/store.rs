//! In-memory storage implementation for record stores.
//!
//! This module provides a simple in-memory backend that stores records as
//! BSON documents in per-collection vectors behind an async-safe read-write
//! lock.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use recordstore_core::{
    backend::{DeleteOutcome, ReplaceOutcome, StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    filter::Filter,
    record::{IDENTITY_FIELD, RecordId, ensure_document_identity},
};

use crate::evaluator::document_matches;

type CollectionVec = Vec<Document>;
type StoreMap = HashMap<String, CollectionVec>;


/// Thread-safe in-memory record storage backend.
///
/// This struct implements the [`StoreBackend`] trait to provide a fully
/// functional record store that operates entirely in memory using
/// async-aware read-write locks. Each collection is a vector of BSON
/// documents kept in insertion order, which is also the order reads report.
///
/// # Thread Safety
///
/// `MemoryStore` is cloneable and uses an `Arc`-wrapped internal state,
/// allowing it to be safely shared across async tasks. Multiple clones of
/// the same instance share the same underlying data.
///
/// # Performance
///
/// Every operation scans its collection (no indexing). For the development
/// and test workloads this backend targets that is typically acceptable;
/// larger datasets belong on a persistent backend.
///
/// # Example
///
/// ```ignore
/// use recordstore::{backend::StoreBackend, filter::Filter};
/// use recordstore_memory::MemoryStore;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryStore::new();
///
///     store.insert_one(doc! { "name": "Alice" }, "User").await?;
///     let documents = store.find(Filter::match_all(), "User").await?;
///     assert_eq!(documents.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    /// The main storage map: collection name -> documents in insertion order
    collections: Arc<RwLock<StoreMap>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory record store.
    ///
    /// The returned store is ready for use and contains no collections or
    /// records.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing a `MemoryStore` with custom options.
    ///
    /// Currently, the builder simply creates a default store, but it can be
    /// extended in future versions to support configuration options.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }
}

fn duplicate_identity(collection: &[Document], id: &Bson) -> bool {
    collection
        .iter()
        .any(|existing| existing.get(IDENTITY_FIELD) == Some(id))
}


#[async_trait]
impl StoreBackend for MemoryStore {
    async fn insert_one(&self, mut document: Document, collection: &str) -> StoreResult<()> {
        let id = ensure_document_identity(&mut document);

        let mut store = self.collections.write().await;
        let documents = store.entry(collection.to_string()).or_default();

        if duplicate_identity(documents, &id) {
            return Err(StoreError::DatabaseOperationFailed(format!(
                "duplicate identity {id} in collection {collection}"
            )));
        }

        documents.push(document);

        Ok(())
    }

    async fn insert_many(&self, documents: Vec<Document>, collection: &str) -> StoreResult<()> {
        let mut prepared = Vec::with_capacity(documents.len());

        for mut document in documents {
            let id = ensure_document_identity(&mut document);
            prepared.push((id, document));
        }

        let mut store = self.collections.write().await;
        let existing = store.entry(collection.to_string()).or_default();

        // The whole batch is validated before anything lands.
        for (index, (id, _)) in prepared.iter().enumerate() {
            let collides_within_batch = prepared[..index].iter().any(|(other, _)| other == id);

            if collides_within_batch || duplicate_identity(existing, id) {
                return Err(StoreError::DatabaseOperationFailed(format!(
                    "duplicate identity {id} in collection {collection}"
                )));
            }
        }

        existing.extend(prepared.into_iter().map(|(_, document)| document));

        Ok(())
    }

    async fn find(&self, filter: Filter, collection: &str) -> StoreResult<Vec<Document>> {
        let store = self.collections.read().await;
        let documents = match store.get(collection) {
            Some(documents) => documents,
            None => return Ok(vec![]),
        };

        Ok(documents
            .iter()
            .filter(|document| document_matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn replace_one(
        &self,
        filter: Filter,
        mut document: Document,
        collection: &str,
    ) -> StoreResult<ReplaceOutcome> {
        let mut store = self.collections.write().await;
        let documents = store.entry(collection.to_string()).or_default();

        match documents
            .iter_mut()
            .find(|existing| document_matches(existing, &filter))
        {
            Some(existing) => {
                // The identity of a stored document never changes; the
                // replacement takes over every other field.
                if let Some(id) = existing.get(IDENTITY_FIELD).cloned() {
                    document.insert(IDENTITY_FIELD, id);
                }

                *existing = document;

                Ok(ReplaceOutcome { acknowledged: true, upserted_id: None })
            }
            None => {
                let id = ensure_document_identity(&mut document);
                let upserted_id = RecordId::from_bson(&id);

                documents.push(document);

                Ok(ReplaceOutcome { acknowledged: true, upserted_id })
            }
        }
    }

    async fn delete_one(&self, filter: Filter, collection: &str) -> StoreResult<DeleteOutcome> {
        let mut store = self.collections.write().await;
        let documents = match store.get_mut(collection) {
            Some(documents) => documents,
            None => return Ok(DeleteOutcome { acknowledged: true, deleted_count: 0 }),
        };

        match documents
            .iter()
            .position(|document| document_matches(document, &filter))
        {
            Some(index) => {
                documents.remove(index);

                Ok(DeleteOutcome { acknowledged: true, deleted_count: 1 })
            }
            None => Ok(DeleteOutcome { acknowledged: true, deleted_count: 0 }),
        }
    }
}


/// Builder for constructing [`MemoryStore`] instances.
///
/// Currently a no-op builder, but can be extended in future versions to
/// support configuration options like capacity hints.
///
/// # Example
///
/// ```ignore
/// use recordstore::backend::StoreBackendBuilder;
/// use recordstore_memory::MemoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryStore::builder().build().await.unwrap();
/// }
/// ```
#[derive(Default)]
pub struct MemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for MemoryStoreBuilder {
    type Backend = MemoryStore;

    /// Builds and returns a new [`MemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MemoryStore::new())
    }
}
