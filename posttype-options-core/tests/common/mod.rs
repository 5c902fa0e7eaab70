//! Shared fixtures for options tests.

#![allow(dead_code)]

use posttype_options_core::{
    InMemoryContentTypes, InMemoryFieldGroups, InMemoryValueStore, OptionsError, OptionsPage,
    OptionsResult, OptionsSettings, OwnerId, TokenIssuer, ValueStore,
};
use posttype_options_model::{
    ContentType, Field, FieldGroup, FieldGroupOptions, Layout, LocationRule, Position,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Fixed clock for token issue/verify.
pub const NOW: i64 = 1_700_000_000;

pub const SEED: [u8; 32] = [7; 32];

/// `post`, `page`, `event`, plus the excluded `attachment` and a private type.
pub fn content_types() -> Vec<ContentType> {
    vec![
        ContentType::new("post", "Posts"),
        ContentType::new("page", "Pages"),
        ContentType::new("event", "Events").with_archive("/events/"),
        ContentType::new("attachment", "Media"),
        ContentType::new("revision", "Revisions").private(),
    ]
}

/// Shown on the options screen.
pub fn event_details_group() -> FieldGroup {
    FieldGroup::new("101", "Event details")
        .with_field(Field::text("subtitle", "subtitle", "Subtitle"))
        .with_field(Field::new("color", "color", "Color", "color_picker"))
        .with_location(vec![LocationRule::equals("post_type_options", "all")])
}

/// Sidebar group, also shown on the options screen.
pub fn sidebar_group() -> FieldGroup {
    FieldGroup::new("102", "Sidebar")
        .with_options(FieldGroupOptions::new(Layout::NoBox, Position::Side))
        .with_field(Field::text("sidebar_note", "sidebar_note", "Note"))
        .with_location(vec![LocationRule::equals("post_type_options", "all")])
}

/// Attached to page edit screens only; never matches the options screen.
pub fn page_only_group() -> FieldGroup {
    FieldGroup::new("201", "Page hero")
        .with_field(Field::text("hero", "hero", "Hero"))
        .with_location(vec![LocationRule::equals("post_type", "page")])
}

pub fn test_issuer() -> TokenIssuer {
    let settings = OptionsSettings::default();
    TokenIssuer::from_seed(SEED, &settings.token_action, settings.token_lifetime_secs)
}

/// A page over the given groups and [`content_types`], backed by `store`.
pub fn page_with(groups: Vec<FieldGroup>, store: Arc<dyn ValueStore>) -> OptionsPage {
    OptionsPage::new(
        OptionsSettings::default(),
        Arc::new(InMemoryFieldGroups::new(groups)),
        Arc::new(InMemoryContentTypes::new(content_types())),
        store,
    )
    .with_token_issuer(test_issuer())
}

/// A page over the matching and non-matching groups with an in-memory store.
pub fn default_page() -> (OptionsPage, Arc<InMemoryValueStore>) {
    let store = Arc::new(InMemoryValueStore::new());
    let page = page_with(
        vec![event_details_group(), page_only_group()],
        store.clone(),
    );
    (page, store)
}

/// Records every `set` call and answers `get` from what was recorded.
#[derive(Default)]
pub struct RecordingStore {
    pub calls: Mutex<Vec<(String, String, Value)>>,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<(String, String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ValueStore for RecordingStore {
    fn get(&self, owner: &OwnerId, field: &Field) -> OptionsResult<Option<Value>> {
        let calls = self.calls.lock().unwrap();
        Ok(calls
            .iter()
            .rev()
            .find(|(o, k, _)| o == owner.as_str() && k == &field.key)
            .map(|(_, _, v)| v.clone()))
    }

    fn set(&self, owner: &OwnerId, field: &Field, value: Value) -> OptionsResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), field.key.clone(), value));
        Ok(())
    }
}

/// Rejects writes for one field key and reads of another.
pub struct FlakyStore {
    pub inner: InMemoryValueStore,
    pub reject_write: String,
    pub reject_read: Option<String>,
}

impl ValueStore for FlakyStore {
    fn get(&self, owner: &OwnerId, field: &Field) -> OptionsResult<Option<Value>> {
        if self.reject_read.as_deref() == Some(field.key.as_str()) {
            return Err(OptionsError::Storage("read refused".into()));
        }
        self.inner.get(owner, field)
    }

    fn set(&self, owner: &OwnerId, field: &Field, value: Value) -> OptionsResult<()> {
        if field.key == self.reject_write {
            return Err(OptionsError::Storage("disk full".into()));
        }
        self.inner.set(owner, field, value)
    }
}
