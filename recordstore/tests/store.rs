//! End-to-end tests for the record store over the in-memory backend.

use bson::DateTime;
use recordstore::{memory::MemoryStore, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
struct Person {
    #[record(id)]
    #[serde(rename = "_id")]
    id: RecordId,
    name: Option<String>,
    age: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
struct Organization {
    #[record(id)]
    #[serde(rename = "_id")]
    id: RecordId,
    name: Option<String>,
    founded: Option<DateTime>,
    people: Option<Vec<Option<Person>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Record)]
struct Note {
    title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Record)]
struct Draft {
    #[record(id)]
    #[serde(rename = "_id")]
    id: RecordId,
    #[serde(rename = "body")]
    text: Option<String>,
    #[serde(skip)]
    dirty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
struct Profile {
    #[record(id)]
    #[serde(rename = "_id")]
    id: RecordId,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

fn store() -> RecordStore<MemoryStore> {
    RecordStore::new(MemoryStore::new())
}

fn person(name: Option<&str>, age: Option<i32>) -> Person {
    Person {
        id: RecordId::new(),
        name: name.map(str::to_string),
        age,
    }
}

fn organization(name: Option<&str>, founded: Option<DateTime>) -> Organization {
    Organization {
        id: RecordId::new(),
        name: name.map(str::to_string),
        founded,
        people: Some(people()),
    }
}

fn people() -> Vec<Option<Person>> {
    vec![
        Some(person(Some("Alice"), Some(42))),
        Some(person(Some("Bob"), Some(39))),
        Some(person(Some("Charlie"), Some(27))),
        Some(person(Some("Daniel"), Some(i32::MAX))),
        Some(person(Some("Eve"), Some(i32::MIN))),
        Some(person(None, Some(19))),
        Some(Person::default()),
        None,
    ]
}

fn organizations() -> Vec<Option<Organization>> {
    vec![
        Some(organization(Some("Argon Org"), Some(DateTime::now()))),
        Some(organization(Some("Berylium Org"), Some(DateTime::MIN))),
        Some(organization(Some("Cesium Org"), Some(DateTime::MAX))),
        Some(Organization {
            id: RecordId::new(),
            name: None,
            founded: Some(DateTime::now()),
            people: None,
        }),
        Some(Organization::default()),
        None,
    ]
}

#[tokio::test]
async fn create_persists_a_record() {
    let store = store();
    let alice = person(Some("Alice"), Some(42));

    store.create(Some(&alice)).await.unwrap();

    let everyone = store.read::<Person>(None).await.unwrap();
    assert_eq!(everyone, vec![alice]);
}

#[tokio::test]
async fn create_rejects_a_null_item() {
    let store = store();

    let result = store.create::<Person>(None).await;

    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
}

#[tokio::test]
async fn creating_the_same_record_twice_fails() {
    let store = store();
    let alice = person(Some("Alice"), Some(42));

    store.create(Some(&alice)).await.unwrap();
    let result = store.create(Some(&alice)).await;

    assert!(matches!(result, Err(StoreError::DatabaseOperationFailed(_))));
}

#[tokio::test]
async fn create_leaves_the_callers_identifier_untouched() {
    let store = store();
    let draft = Person {
        name: Some("Alice".to_string()),
        age: Some(42),
        ..Person::default()
    };

    store.create(Some(&draft)).await.unwrap();

    assert!(draft.id.is_unassigned());
    let stored = store.read::<Person>(None).await.unwrap();
    assert!(!stored[0].id.is_unassigned());
}

#[tokio::test]
async fn create_many_rejects_a_verbatim_rerun() {
    let store = store();
    let batch = people();

    store.create_many(&batch[..7]).await.unwrap();
    let result = store.create_many(&batch[..7]).await;

    assert!(matches!(result, Err(StoreError::DatabaseOperationFailed(_))));
    assert_eq!(store.read::<Person>(None).await.unwrap().len(), 7);
}

#[tokio::test]
async fn create_many_rejects_a_batch_containing_null() {
    let store = store();
    let batch = people();

    let result = store.create_many(&batch).await;

    assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    assert!(store.read::<Person>(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn read_without_a_filter_returns_every_record() {
    let store = store();
    let batch = people();
    store.create_many(&batch[..7]).await.unwrap();

    let everyone = store.read::<Person>(None).await.unwrap();

    assert_eq!(everyone.len(), 7);
    assert_eq!(Some(&everyone[0]), batch[0].as_ref());
}

#[tokio::test]
async fn read_filters_by_identifier() {
    let store = store();
    store.create_many(&people()[1..6]).await.unwrap();
    store.create_many(&organizations()[1..4]).await.unwrap();

    let alice = person(Some("Alice"), Some(42));
    store.create(Some(&alice)).await.unwrap();

    let example = Person { id: alice.id, ..Person::default() };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found, vec![alice]);
}

#[tokio::test]
async fn read_filters_by_populated_fields_only() {
    let store = store();
    store.create_many(&people()[1..6]).await.unwrap();
    store.create_many(&organizations()[1..4]).await.unwrap();

    let argon = organization(Some("Argon Org"), Some(DateTime::now()));
    store.create(Some(&argon)).await.unwrap();

    let example = Organization { name: argon.name.clone(), ..Organization::default() };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, argon.id);
    assert_eq!(found[0].founded, argon.founded);
    assert_eq!(
        found[0].people.as_ref().map(Vec::len),
        argon.people.as_ref().map(Vec::len),
    );
}

#[tokio::test]
async fn read_matches_on_every_populated_field() {
    let store = store();
    store.create_many(&people()[..7]).await.unwrap();

    let mismatched = Person {
        name: Some("Alice".to_string()),
        age: Some(27),
        ..Person::default()
    };
    assert!(store.read(Some(&mismatched)).await.unwrap().is_empty());

    let example = Person {
        name: Some("Charlie".to_string()),
        age: Some(27),
        ..Person::default()
    };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.as_deref(), Some("Charlie"));
}

#[tokio::test]
async fn an_all_default_example_matches_everything() {
    let store = store();
    store.create_many(&people()[..5]).await.unwrap();

    let found = store.read(Some(&Person::default())).await.unwrap();

    assert_eq!(found.len(), 5);
}

#[tokio::test]
async fn update_replaces_the_record_matching_its_identity() {
    let store = store();
    store.create_many(&people()[1..6]).await.unwrap();
    store.create_many(&organizations()[1..4]).await.unwrap();

    let mut argon = organization(Some("Argon Org"), Some(DateTime::now()));
    store.create(Some(&argon)).await.unwrap();

    argon.name = Some("Actual Org".to_string());
    store.update(&mut argon).await.unwrap();

    let example = Organization { name: argon.name.clone(), ..Organization::default() };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, argon.id);
    assert_eq!(found[0].founded, argon.founded);
    assert_eq!(found[0].people.as_ref().map(Vec::len), Some(8));
}

#[tokio::test]
async fn update_inserts_when_nothing_matches_and_backfills_the_identifier() {
    let store = store();
    store.create_many(&people()[1..6]).await.unwrap();

    let mut alice = Person {
        name: Some("Alice".to_string()),
        age: Some(42),
        ..Person::default()
    };
    store.update(&mut alice).await.unwrap();

    assert!(!alice.id.is_unassigned());

    let example = Person { name: Some("Alice".to_string()), ..Person::default() };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, alice.id);
}

#[tokio::test]
async fn update_requires_an_identity_field() {
    let store = store();
    let mut note = Note { title: Some("todo".to_string()) };

    let result = store.update(&mut note).await;

    assert!(matches!(result, Err(StoreError::MissingIdentityField("Note"))));
}

#[tokio::test]
async fn delete_removes_the_record_matching_its_identity() {
    let store = store();
    store.create_many(&people()[1..6]).await.unwrap();
    store.create_many(&organizations()[1..4]).await.unwrap();

    let argon = organization(Some("Argon Org"), Some(DateTime::now()));
    store.create(Some(&argon)).await.unwrap();

    store.delete(&argon).await.unwrap();

    let example = Organization { name: argon.name.clone(), ..Organization::default() };
    assert!(store.read(Some(&example)).await.unwrap().is_empty());
    assert_eq!(store.read::<Organization>(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn deleting_a_missing_record_succeeds() {
    let store = store();

    store.delete(&person(Some("Alice"), Some(42))).await.unwrap();
}

#[tokio::test]
async fn delete_requires_an_identity_field() {
    let store = store();
    let note = Note { title: Some("todo".to_string()) };

    let result = store.delete(&note).await;

    assert!(matches!(result, Err(StoreError::MissingIdentityField("Note"))));
}

#[tokio::test]
async fn each_type_reads_from_its_own_collection() {
    let store = store();
    store.create(Some(&person(Some("Alice"), Some(42)))).await.unwrap();
    store.create(Some(&Note { title: Some("todo".to_string()) })).await.unwrap();

    assert_eq!(store.read::<Person>(None).await.unwrap().len(), 1);
    assert_eq!(store.read::<Note>(None).await.unwrap().len(), 1);
}

#[test]
fn the_derive_names_the_collection_after_the_type() {
    assert_eq!(Person::type_name(), "Person");
    assert_eq!(Organization::type_name(), "Organization");
}

#[test]
fn the_derive_lists_fields_in_declaration_order() {
    let names = Person::fields().iter().map(|field| field.name).collect::<Vec<_>>();

    assert_eq!(names, vec!["_id", "name", "age"]);
}

#[test]
fn the_derive_only_declares_an_identity_when_one_is_marked() {
    assert!(Person::identity().is_some());
    assert!(Note::identity().is_none());
}

#[test]
fn serde_attributes_shape_the_field_table() {
    let names = Draft::fields().iter().map(|field| field.name).collect::<Vec<_>>();

    assert_eq!(names, vec!["_id", "body"]);
}

#[test]
fn container_level_renaming_shapes_the_field_table() {
    let names = Profile::fields().iter().map(|field| field.name).collect::<Vec<_>>();

    assert_eq!(names, vec!["_id", "displayName", "avatarUrl"]);
}

#[tokio::test]
async fn read_by_example_matches_renamed_fields() {
    let store = store();
    let stored = Profile {
        id: RecordId::new(),
        display_name: Some("Ada".to_string()),
        avatar_url: None,
    };
    store.create(Some(&stored)).await.unwrap();

    let example = Profile {
        display_name: Some("Ada".to_string()),
        ..Profile::default()
    };
    let found = store.read(Some(&example)).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0], stored);
}

#[test]
fn records_round_trip_through_documents_and_json() {
    let alice = person(Some("Alice"), Some(42));

    let document = alice.to_document().unwrap();
    assert_eq!(Person::from_document(document).unwrap(), alice);

    let json = alice.to_json().unwrap();
    assert_eq!(json["name"], serde_json::json!("Alice"));
    assert_eq!(json["age"], serde_json::json!(42));
    assert_eq!(Person::from_json(json).unwrap(), alice);
}
