use posttype_options_admin::JsonFileValueStore;
use posttype_options_core::{owner_id, OptionsError, ValueStore};
use posttype_options_model::Field;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn subtitle() -> Field {
    Field::text("subtitle", "subtitle", "Subtitle")
}

#[test]
fn missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileValueStore::open(dir.path().join("values.json")).unwrap();
    assert_eq!(store.get(&owner_id("post"), &subtitle()).unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn set_persists_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.json");

    let store = JsonFileValueStore::open(&path).unwrap();
    store.set(&owner_id("event"), &subtitle(), json!("Keynote")).unwrap();
    drop(store);

    let reopened = JsonFileValueStore::open(&path).unwrap();
    assert_eq!(
        reopened.get(&owner_id("event"), &subtitle()).unwrap(),
        Some(json!("Keynote"))
    );
    assert_eq!(reopened.get(&owner_id("post"), &subtitle()).unwrap(), None);
}

#[test]
fn file_layout_is_owner_then_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.json");
    let store = JsonFileValueStore::open(&path).unwrap();
    store.set(&owner_id("post"), &subtitle(), json!("P")).unwrap();
    store.set(&owner_id("event"), &subtitle(), json!("E")).unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "post_type_option_event": { "subtitle": "E" },
            "post_type_option_post": { "subtitle": "P" },
        })
    );
}

#[test]
fn overwrite_keeps_last_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileValueStore::open(dir.path().join("values.json")).unwrap();
    store.set(&owner_id("post"), &subtitle(), json!("old")).unwrap();
    store.set(&owner_id("post"), &subtitle(), json!("new")).unwrap();
    assert_eq!(
        store.get(&owner_id("post"), &subtitle()).unwrap(),
        Some(json!("new"))
    );
}

#[test]
fn corrupt_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.json");
    std::fs::write(&path, "not json").unwrap();
    let err = JsonFileValueStore::open(&path).unwrap_err();
    assert!(matches!(err, OptionsError::Serialization(_)));
}

#[test]
fn failed_write_is_reported_and_rolled_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("values.json");
    let store = JsonFileValueStore::open(&path).unwrap();

    let err = store
        .set(&owner_id("post"), &subtitle(), json!("lost"))
        .unwrap_err();
    assert!(matches!(err, OptionsError::Storage(_)));
    assert_eq!(store.get(&owner_id("post"), &subtitle()).unwrap(), None);
}
