//! Core traits and types for record representation and identity.
//!
//! This module provides the fundamental traits that all stored records must implement,
//! the opaque [`RecordId`] identifier type, and utilities for converting records
//! between formats (BSON, JSON).

use bson::{Bson, Document, de::deserialize_from_bson, oid::ObjectId, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};
use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Well-known name of the identity field shared by every record type.
///
/// A record type declares at most one field stored under this name; marking
/// it as the identity is what satisfies the identity requirement of
/// [`RecordStore::update`](crate::store::RecordStore::update) and
/// [`RecordStore::delete`](crate::store::RecordStore::delete).
pub const IDENTITY_FIELD: &str = "_id";

/// Opaque unique identifier assigned by the database on first persistence.
///
/// A freshly constructed record carries the unassigned sentinel (all zero
/// bytes). The sentinel means "not yet persisted": filter construction treats
/// it as absent, and backends replace it with a real identifier before
/// storing a document, so the sentinel itself never reaches the database.
///
/// # Example
///
/// ```ignore
/// use recordstore::record::RecordId;
///
/// let id = RecordId::unassigned();
/// assert!(id.is_unassigned());
///
/// let id = RecordId::new();
/// assert!(!id.is_unassigned());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(ObjectId);

impl RecordId {
    /// Generates a new unique identifier.
    pub fn new() -> Self {
        RecordId(ObjectId::new())
    }

    /// Returns the unassigned sentinel identifier (all zero bytes).
    pub fn unassigned() -> Self {
        RecordId(ObjectId::from_bytes([0; 12]))
    }

    /// Returns `true` if this identifier is the unassigned sentinel.
    pub fn is_unassigned(&self) -> bool {
        self.0.bytes() == [0; 12]
    }

    /// Extracts an identifier from a BSON value, if it holds one.
    pub fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::ObjectId(oid) => Some(RecordId(*oid)),
            _ => None,
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl From<ObjectId> for RecordId {
    fn from(oid: ObjectId) -> Self {
        RecordId(oid)
    }
}

impl From<RecordId> for Bson {
    fn from(id: RecordId) -> Self {
        Bson::ObjectId(id.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Describes one named field of a record type.
///
/// The descriptor pairs the name the field is stored under with an accessor
/// producing the field's current value as BSON. Tables of these descriptors
/// replace runtime reflection: filter construction walks them in declaration
/// order to decide which predicates a record contributes.
pub struct FieldSpec<R> {
    /// Field name as stored in the database.
    pub name: &'static str,
    /// Accessor returning the field's current value.
    pub get: fn(&R) -> StoreResult<Bson>,
}

impl<R> Clone for FieldSpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldSpec<R> {}

impl<R> fmt::Debug for FieldSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .finish()
    }
}

/// Accessor pair for a record type's identity field.
///
/// The setter exists for one purpose: writing a database-assigned identifier
/// back into a record after an upsert inserted it.
pub struct IdentitySpec<R> {
    /// Reads the identity value.
    pub get: fn(&R) -> RecordId,
    /// Writes a database-assigned identity back into the record.
    pub set: fn(&mut R, RecordId),
}

impl<R> Clone for IdentitySpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for IdentitySpec<R> {}

impl<R> fmt::Debug for IdentitySpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentitySpec").finish()
    }
}

/// Core trait that all records stored in a record store must implement.
///
/// This trait defines the minimal interface required for a type to be used as
/// a record: a declared type name (which doubles as the collection name), a
/// field descriptor table, and optionally an identity field. It is usually
/// produced by `#[derive(Record)]`, but can be implemented by hand.
///
/// # Identity
///
/// A type declares either exactly one identity field or none. Types without
/// one can still be created and read, but cannot be targeted by update or
/// delete; those operations fail fast with
/// [`StoreError::MissingIdentityField`](crate::error::StoreError::MissingIdentityField)
/// before touching the database.
///
/// # Example
///
/// ```ignore
/// use recordstore::record::{FieldSpec, IdentitySpec, Record, RecordId, field_value};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct User {
///     #[serde(rename = "_id")]
///     pub id: RecordId,
///     pub name: Option<String>,
/// }
///
/// impl Record for User {
///     fn type_name() -> &'static str {
///         "User"
///     }
///
///     fn fields() -> &'static [FieldSpec<Self>] {
///         const FIELDS: &[FieldSpec<User>] = &[
///             FieldSpec { name: "_id", get: |user| field_value(&user.id) },
///             FieldSpec { name: "name", get: |user| field_value(&user.name) },
///         ];
///
///         FIELDS
///     }
///
///     fn identity() -> Option<IdentitySpec<Self>> {
///         Some(IdentitySpec {
///             get: |user| user.id,
///             set: |user, id| user.id = id,
///         })
///     }
/// }
/// ```
pub trait Record: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the record type's declared name.
    ///
    /// Collections are resolved by this name, one collection per record type
    /// for the lifetime of the database.
    fn type_name() -> &'static str;

    /// Returns the field descriptor table, in declaration order.
    fn fields() -> &'static [FieldSpec<Self>];

    /// Returns the identity field accessors, if the type declares one.
    fn identity() -> Option<IdentitySpec<Self>> {
        None
    }
}

/// Serializes a single field value for use in a field descriptor accessor.
///
/// `None` values serialize to BSON null, which filter construction treats
/// as absent rather than as a match-null predicate.
pub fn field_value<V: Serialize>(value: &V) -> StoreResult<Bson> {
    Ok(serialize_to_bson(value)?)
}

/// Assigns a fresh identifier to a document whose identity entry is missing,
/// null, or the unassigned sentinel, and returns the effective identity value.
///
/// Backends call this before persisting so the sentinel is never stored. A
/// document that already carries a real identifier is left untouched.
pub fn ensure_document_identity(document: &mut Document) -> Bson {
    match document.get(IDENTITY_FIELD) {
        Some(Bson::ObjectId(oid)) if !RecordId::from(*oid).is_unassigned() => {
            return Bson::ObjectId(*oid);
        }
        Some(Bson::Null) | Some(Bson::ObjectId(_)) | None => {}
        Some(other) => return other.clone(),
    }

    let assigned = Bson::ObjectId(ObjectId::new());
    document.insert(IDENTITY_FIELD, assigned.clone());

    assigned
}

/// Extension trait providing serialization/deserialization utilities for records.
///
/// This trait is automatically implemented for all types that implement [`Record`].
/// It provides convenient methods to convert records to and from BSON documents
/// and JSON values.
pub trait RecordExt: Record {
    /// Converts this record to a BSON document for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the record does not
    /// serialize to a document (e.g. a newtype over a scalar).
    fn to_document(&self) -> StoreResult<Document>;

    /// Creates a record from a stored BSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_document(document: Document) -> StoreResult<Self>;

    /// Converts this record to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_json(value: Value) -> StoreResult<Self>;
}

impl<R: Record> RecordExt for R {
    fn to_document(&self) -> StoreResult<Document> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            _ => Err(StoreError::Serialization(format!(
                "{} did not serialize to a document",
                Self::type_name()
            ))),
        }
    }

    fn from_document(document: Document) -> StoreResult<Self> {
        Ok(deserialize_from_bson(Bson::Document(document))?)
    }

    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}
