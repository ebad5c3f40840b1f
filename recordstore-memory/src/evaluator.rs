//! Filter evaluation for in-memory record matching.
//!
//! This module provides the matching engine the in-memory backend runs
//! against stored BSON documents when serving find, replace, and delete
//! operations.

use bson::{Bson, Document};

use recordstore_core::filter::Filter;

/// Returns true when `document` satisfies every predicate in `filter`.
///
/// An empty filter matches everything. A predicate on a field the document
/// does not carry never matches; an explicit null in the document and an
/// absent field are distinct states.
pub(crate) fn document_matches(document: &Document, filter: &Filter) -> bool {
    filter.predicates().iter().all(|predicate| {
        document
            .get(&predicate.field)
            .is_some_and(|value| values_equal(value, &predicate.value))
    })
}

/// Equality over BSON values with numeric normalization.
///
/// Integer and floating point representations of the same quantity compare
/// equal, the way a document database treats them. Arrays and embedded
/// documents are compared element-wise so normalization applies at any
/// depth; every other type uses structural equality.
fn values_equal(left: &Bson, right: &Bson) -> bool {
    if let (Some(left), Some(right)) = (numeric(left), numeric(right)) {
        return left == right;
    }

    match (left, right) {
        (Bson::Array(left), Bson::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(a, b)| values_equal(a, b))
        }
        (Bson::Document(left), Bson::Document(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, a)| right.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => left == right,
    }
}

fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(value) => Some(*value as f64),
        Bson::Int64(value) => Some(*value as f64),
        Bson::Double(value) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn an_empty_filter_matches_any_document() {
        let document = doc! { "name": "Alice" };

        assert!(document_matches(&document, &Filter::match_all()));
        assert!(document_matches(&doc! {}, &Filter::match_all()));
    }

    #[test]
    fn a_predicate_on_a_missing_field_never_matches() {
        let document = doc! { "name": "Alice" };
        let filter = Filter::match_all().and_eq("age", 42);

        assert!(!document_matches(&document, &filter));
    }

    #[test]
    fn a_null_predicate_requires_an_explicit_null() {
        let filter = Filter::match_all().and_eq("name", Bson::Null);

        assert!(document_matches(&doc! { "name": Bson::Null }, &filter));
        assert!(!document_matches(&doc! {}, &filter));
    }

    #[test]
    fn numeric_values_compare_across_representations() {
        let document = doc! { "age": 42_i64 };

        assert!(document_matches(&document, &Filter::match_all().and_eq("age", 42_i32)));
        assert!(document_matches(&document, &Filter::match_all().and_eq("age", 42.0)));
        assert!(!document_matches(&document, &Filter::match_all().and_eq("age", 43_i32)));
    }

    #[test]
    fn normalization_reaches_into_arrays_and_embedded_documents() {
        let document = doc! { "readings": [ { "value": 1_i32 }, { "value": 2_i32 } ] };
        let filter = Filter::match_all()
            .and_eq("readings", vec![doc! { "value": 1_i64 }, doc! { "value": 2.0 }]);

        assert!(document_matches(&document, &filter));
    }

    #[test]
    fn conjunction_requires_every_predicate_to_hold() {
        let document = doc! { "name": "Alice", "age": 42 };
        let matching = Filter::match_all().and_eq("name", "Alice").and_eq("age", 42);
        let failing = Filter::match_all().and_eq("name", "Alice").and_eq("age", 27);

        assert!(document_matches(&document, &matching));
        assert!(!document_matches(&document, &failing));
    }
}
