//! Record store interface performing generic CRUD dispatch over a backend.
//!
//! This module provides the primary API for working with record stores. A
//! [`RecordStore`] owns a backend handle and, for any type implementing
//! [`Record`], derives the collection name, query filter, and identity
//! reconciliation from the type's shape; callers never write type-specific
//! query code.
//!
//! # Example
//!
//! ```ignore
//! use recordstore::{memory::MemoryStore, prelude::*};
//!
//! let store = RecordStore::new(MemoryStore::new());
//!
//! store.create(Some(&user)).await?;
//! let everyone = store.read::<User>(None).await?;
//! ```

use tracing::warn;

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    filter::Filter,
    record::{IDENTITY_FIELD, Record, RecordExt, RecordId},
};

/// A generic record store bound to a specific backend implementation.
///
/// The store is stateless apart from the backend handle it holds: every
/// operation re-resolves its collection by type name, builds its filter from
/// the record it was given, and issues a single awaited round trip. It keeps
/// no cache, takes no locks of its own, and never retries; concurrent use is
/// as safe as the underlying backend makes it.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
///
/// # Example
///
/// ```ignore
/// let store = RecordStore::new(my_backend);
/// store.create(Some(&record)).await?;
/// ```
#[derive(Debug)]
pub struct RecordStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> RecordStore<B> {
    /// Creates a new record store with the given backend.
    ///
    /// The backend's lifecycle is owned by the caller; dropping the store
    /// drops the handle, nothing more.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts one record into its type's collection.
    ///
    /// `None` is rejected with [`StoreError::InvalidArgument`] before any
    /// database call; a null item is a failure, not a no-op. A rejected
    /// insert, including a duplicate identity, surfaces as
    /// [`StoreError::DatabaseOperationFailed`].
    ///
    /// The identifier the backend assigns is not written back to the
    /// caller's record; use [`update`](Self::update) when reconciliation is
    /// needed.
    pub async fn create<T: Record>(&self, item: Option<&T>) -> StoreResult<()> {
        let item = item.ok_or_else(|| {
            StoreError::InvalidArgument(format!("null {} passed to create", T::type_name()))
        })?;

        self.backend
            .insert_one(item.to_document()?, T::type_name())
            .await
            .inspect_err(|error| warn!("create {} failed: {error}", T::type_name()))
    }

    /// Inserts a batch of records into their type's collection in one call.
    ///
    /// The whole batch is validated first: any `None` element fails with
    /// [`StoreError::InvalidArgument`] and nothing is written. A rejected
    /// batch, e.g. a verbatim re-run colliding on identities, surfaces as
    /// [`StoreError::DatabaseOperationFailed`]. Partial success is bounded by
    /// the backend's own batch-insert semantics.
    pub async fn create_many<T: Record>(&self, items: &[Option<T>]) -> StoreResult<()> {
        let mut documents = Vec::with_capacity(items.len());

        for item in items {
            let item = item.as_ref().ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "null {} in batch passed to create_many",
                    T::type_name()
                ))
            })?;

            documents.push(item.to_document()?);
        }

        self.backend
            .insert_many(documents, T::type_name())
            .await
            .inspect_err(|error| warn!("create_many {} failed: {error}", T::type_name()))
    }

    /// Reads records from the type's collection.
    ///
    /// With `None`, every document in the collection is returned in the
    /// database's natural order. With a record, an equality filter is built
    /// from its populated fields ([`Filter::equality_of`]); a record with no
    /// populated fields matches everything rather than nothing. No match
    /// yields an empty vector, not an error.
    pub async fn read<T: Record>(&self, filter: Option<&T>) -> StoreResult<Vec<T>> {
        let filter = match filter {
            Some(record) => Filter::equality_of(record)?,
            None => Filter::match_all(),
        };

        self.backend
            .find(filter, T::type_name())
            .await
            .inspect_err(|error| warn!("read {} failed: {error}", T::type_name()))?
            .into_iter()
            .map(T::from_document)
            .collect()
    }

    /// Replaces the record matching `item`'s identity, inserting `item` when
    /// no match exists.
    ///
    /// Requires the type to declare an identity field; fails fast with
    /// [`StoreError::MissingIdentityField`] otherwise, independent of
    /// database state. A record still holding the unassigned identifier is
    /// given a fresh one before the call, so the identity filter and the
    /// outgoing document agree on `_id`. When the upsert inserted a new
    /// document, the assigned identifier is written back into `item` before
    /// returning. This is the only place the store mutates caller-owned
    /// data.
    ///
    /// An unacknowledged write fails with
    /// [`StoreError::DatabaseOperationFailed`].
    pub async fn update<T: Record>(&self, item: &mut T) -> StoreResult<()> {
        let identity = T::identity().ok_or(StoreError::MissingIdentityField(T::type_name()))?;

        // MongoDB rejects a replacement whose `_id` differs from the one the
        // filter pins, even when the upsert inserts; filter and document
        // must carry the same effective identifier.
        let mut id = (identity.get)(item);
        let mut document = item.to_document()?;

        if id.is_unassigned() {
            id = RecordId::new();
            document.insert(IDENTITY_FIELD, id);
        }

        let outcome = self
            .backend
            .replace_one(Filter::identity(id), document, T::type_name())
            .await
            .inspect_err(|error| warn!("update {} failed: {error}", T::type_name()))?;

        if !outcome.acknowledged {
            return Err(StoreError::DatabaseOperationFailed(format!(
                "unacknowledged replace in {}",
                T::type_name()
            )));
        }

        if let Some(id) = outcome.upserted_id {
            (identity.set)(item, id);
        }

        Ok(())
    }

    /// Deletes at most one record matching `filter`'s identity.
    ///
    /// Requires the type to declare an identity field; fails fast with
    /// [`StoreError::MissingIdentityField`] otherwise. Matching zero
    /// documents still succeeds, so deletion is idempotent from the caller's
    /// point of view; only an unacknowledged write is a failure.
    pub async fn delete<T: Record>(&self, filter: &T) -> StoreResult<()> {
        let outcome = self
            .backend
            .delete_one(Filter::identity_of(filter)?, T::type_name())
            .await
            .inspect_err(|error| warn!("delete {} failed: {error}", T::type_name()))?;

        if !outcome.acknowledged {
            return Err(StoreError::DatabaseOperationFailed(format!(
                "unacknowledged delete in {}",
                T::type_name()
            )));
        }

        Ok(())
    }
}
