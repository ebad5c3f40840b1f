//! Equality filter construction for record queries.
//!
//! Filters are conjunctions of per-field equality predicates derived from a
//! record instance. Two construction modes exist:
//!
//! - **Full-equality mode** ([`Filter::equality_of`]) - every populated field
//!   of the record contributes a predicate; used by reads.
//! - **Identity-only mode** ([`Filter::identity_of`]) - a single predicate on
//!   the designated identity field; used by writes.
//!
//! A filter with zero predicates is the match-all sentinel: it places no
//! constraint on the collection rather than matching nothing. This inversion
//! is deliberate and load-bearing; an all-default filter record means "no
//! constraint", never "impossible constraint".

use bson::Bson;

use crate::{
    error::{StoreError, StoreResult},
    record::{IDENTITY_FIELD, Record, RecordId},
};

/// A single equality predicate on a named field.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The field name to compare.
    pub field: String,
    /// The value the field must equal.
    pub value: Bson,
}

/// A conjunction of equality predicates.
///
/// Filters are ephemeral values built per call and never persisted. Backends
/// translate them into their native query form.
///
/// # Example
///
/// ```ignore
/// use recordstore::filter::Filter;
///
/// let filter = Filter::eq("name", "Alice").and_eq("age", 42);
/// assert_eq!(filter.predicates().len(), 2);
///
/// let everything = Filter::match_all();
/// assert!(everything.is_match_all());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Returns the filter that matches every document in a collection.
    pub fn match_all() -> Self {
        Filter { predicates: Vec::new() }
    }

    /// Creates a filter with a single equality predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::match_all().and_eq(field, value)
    }

    /// Appends an equality predicate to this filter.
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Creates an identity-only filter for the given identifier.
    pub fn identity(id: RecordId) -> Self {
        Filter::eq(IDENTITY_FIELD, id)
    }

    /// Returns `true` if this filter matches all documents.
    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the predicates in construction order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Builds a full-equality filter from every populated field of `record`.
    ///
    /// Fields are visited in declaration order, which keeps the result
    /// deterministic even though predicate order does not change what the
    /// conjunction matches. Null values are skipped, as is an identifier
    /// still holding the unassigned sentinel. A record with no contributing
    /// fields yields the match-all filter.
    pub fn equality_of<R: Record>(record: &R) -> StoreResult<Self> {
        let mut filter = Filter::match_all();

        for spec in R::fields() {
            let value = (spec.get)(record)?;

            if matches!(value, Bson::Null) {
                continue;
            }
            if RecordId::from_bson(&value).is_some_and(|id| id.is_unassigned()) {
                continue;
            }

            filter = filter.and_eq(spec.name, value);
        }

        Ok(filter)
    }

    /// Builds an identity-only filter from `record`'s identity field.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::MissingIdentityField`] if the type does not
    /// declare an identity field.
    pub fn identity_of<R: Record>(record: &R) -> StoreResult<Self> {
        let identity = R::identity().ok_or(StoreError::MissingIdentityField(R::type_name()))?;

        Ok(Filter::identity((identity.get)(record)))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::record::{FieldSpec, IdentitySpec, field_value};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Sensor {
        #[serde(rename = "_id")]
        id: RecordId,
        name: Option<String>,
        channel: i32,
    }

    impl Record for Sensor {
        fn type_name() -> &'static str {
            "Sensor"
        }

        fn fields() -> &'static [FieldSpec<Self>] {
            const FIELDS: &[FieldSpec<Sensor>] = &[
                FieldSpec { name: "_id", get: |sensor| field_value(&sensor.id) },
                FieldSpec { name: "name", get: |sensor| field_value(&sensor.name) },
                FieldSpec { name: "channel", get: |sensor| field_value(&sensor.channel) },
            ];

            FIELDS
        }

        fn identity() -> Option<IdentitySpec<Self>> {
            Some(IdentitySpec {
                get: |sensor| sensor.id,
                set: |sensor, id| sensor.id = id,
            })
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Reading {
        value: Option<f64>,
    }

    impl Record for Reading {
        fn type_name() -> &'static str {
            "Reading"
        }

        fn fields() -> &'static [FieldSpec<Self>] {
            const FIELDS: &[FieldSpec<Reading>] =
                &[FieldSpec { name: "value", get: |reading| field_value(&reading.value) }];

            FIELDS
        }
    }

    #[test]
    fn populated_fields_contribute_predicates_in_declaration_order() {
        let sensor = Sensor {
            id: RecordId::unassigned(),
            name: Some("thermo".to_string()),
            channel: 3,
        };

        let filter = Filter::equality_of(&sensor).unwrap();
        let fields = filter
            .predicates()
            .iter()
            .map(|predicate| predicate.field.as_str())
            .collect::<Vec<_>>();

        assert_eq!(fields, vec!["name", "channel"]);
    }

    #[test]
    fn null_values_and_the_unassigned_identifier_are_skipped() {
        let sensor = Sensor {
            id: RecordId::unassigned(),
            name: None,
            channel: 0,
        };

        let filter = Filter::equality_of(&sensor).unwrap();

        assert_eq!(filter.predicates().len(), 1);
        assert_eq!(filter.predicates()[0].field, "channel");
    }

    #[test]
    fn an_assigned_identifier_contributes_a_predicate() {
        let id = RecordId::new();
        let sensor = Sensor { id, name: None, channel: 1 };

        let filter = Filter::equality_of(&sensor).unwrap();

        assert_eq!(filter.predicates()[0].field, IDENTITY_FIELD);
        assert_eq!(filter.predicates()[0].value, Bson::from(id));
    }

    #[test]
    fn a_record_with_no_contributing_fields_matches_everything() {
        let reading = Reading { value: None };

        let filter = Filter::equality_of(&reading).unwrap();

        assert!(filter.is_match_all());
    }

    #[test]
    fn identity_filter_is_a_single_predicate_on_the_identity_field() {
        let id = RecordId::new();
        let sensor = Sensor { id, name: Some("thermo".to_string()), channel: 3 };

        let filter = Filter::identity_of(&sensor).unwrap();

        assert_eq!(filter.predicates().len(), 1);
        assert_eq!(filter.predicates()[0].field, IDENTITY_FIELD);
        assert_eq!(filter.predicates()[0].value, Bson::from(id));
    }

    #[test]
    fn identity_filter_requires_an_identity_field() {
        let reading = Reading { value: Some(1.5) };

        let result = Filter::identity_of(&reading);

        assert!(matches!(result, Err(StoreError::MissingIdentityField("Reading"))));
    }
}
