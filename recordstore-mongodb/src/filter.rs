//! Filter translation from recordstore predicates to MongoDB query syntax.
//!
//! This module renders the store's equality filters as MongoDB BSON query
//! documents for execution by the MongoDB query engine.

use bson::{Document, doc};

use recordstore_core::filter::Filter;

/// Renders `filter` as a MongoDB query document.
///
/// An empty filter becomes the empty document, which MongoDB treats as
/// match-all. Anything else becomes an `$and` of one `$eq` clause per
/// predicate, preserving predicate order.
pub(crate) fn to_query_document(filter: &Filter) -> Document {
    if filter.is_match_all() {
        return doc! {};
    }

    doc! {
        "$and": filter
            .predicates()
            .iter()
            .map(|predicate| doc! { predicate.field.as_str(): { "$eq": &predicate.value } })
            .collect::<Vec<_>>(),
    }
}
