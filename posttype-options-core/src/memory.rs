//! In-memory collaborators, used by tests and by hosts that load their
//! definitions up front.

use crate::error::{OptionsError, OptionsResult};
use crate::keys::OwnerId;
use crate::registry::{ContentTypeRegistry, FieldGroupRegistry, ValueStore};
use posttype_options_model::{ContentType, Field, FieldGroup};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// A fixed list of field groups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFieldGroups {
    groups: Vec<FieldGroup>,
}

impl InMemoryFieldGroups {
    pub fn new(groups: Vec<FieldGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }
}

impl FieldGroupRegistry for InMemoryFieldGroups {
    fn list_field_groups(&self) -> Vec<FieldGroup> {
        self.groups.clone()
    }

    fn get_fields(&self, group_id: &str) -> Option<Vec<Field>> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.fields.clone())
    }

    fn load_field(&self, field_key: &str) -> Option<Field> {
        self.groups.iter().find_map(|g| g.field(field_key)).cloned()
    }
}

/// A fixed list of content types.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentTypes {
    types: Vec<ContentType>,
}

impl InMemoryContentTypes {
    pub fn new(types: Vec<ContentType>) -> Self {
        Self { types }
    }
}

impl ContentTypeRegistry for InMemoryContentTypes {
    fn list_public_content_types(&self, exclude: &[String]) -> Vec<ContentType> {
        self.types
            .iter()
            .filter(|t| t.public && !exclude.iter().any(|name| name == &t.name))
            .cloned()
            .collect()
    }
}

/// Values kept in a map keyed by `(owner, field key)`.
///
/// Last write wins; there is no versioning.
#[derive(Debug, Default)]
pub struct InMemoryValueStore {
    values: Mutex<HashMap<(OwnerId, String), Value>>,
}

impl InMemoryValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of every stored value, for comparisons in tests.
    pub fn snapshot(&self) -> BTreeMap<(OwnerId, String), Value> {
        self.values
            .lock()
            .map(|v| v.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    fn guard(
        &self,
    ) -> OptionsResult<std::sync::MutexGuard<'_, HashMap<(OwnerId, String), Value>>> {
        self.values
            .lock()
            .map_err(|_| OptionsError::Storage("value store lock poisoned".into()))
    }
}

impl ValueStore for InMemoryValueStore {
    fn get(&self, owner: &OwnerId, field: &Field) -> OptionsResult<Option<Value>> {
        let values = self.guard()?;
        Ok(values.get(&(owner.clone(), field.key.clone())).cloned())
    }

    fn set(&self, owner: &OwnerId, field: &Field, value: Value) -> OptionsResult<()> {
        let mut values = self.guard()?;
        values.insert((owner.clone(), field.key.clone()), value);
        Ok(())
    }
}
