//! A [`ValueStore`] persisted as one JSON document.
//!
//! ```json
//! { "post_type_option_event": { "subtitle": "Keynote" } }
//! ```

use posttype_options_core::{OptionsError, OptionsResult, OwnerId, ValueStore};
use posttype_options_model::Field;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

type Document = BTreeMap<String, BTreeMap<String, Value>>;

/// Keeps every value in memory and rewrites the whole file after each write.
#[derive(Debug)]
pub struct JsonFileValueStore {
    path: PathBuf,
    values: Mutex<Document>,
}

impl JsonFileValueStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a store document.
    pub fn open(path: impl Into<PathBuf>) -> OptionsResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let values: Document = serde_json::from_str(&contents)?;
            info!("Opened value store {:?} with {} owners", path, values.len());
            values
        } else {
            info!("No value store at {:?}, starting empty", path);
            Document::new()
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> OptionsResult<MutexGuard<'_, Document>> {
        self.values
            .lock()
            .map_err(|_| OptionsError::Storage("value store lock poisoned".into()))
    }

    /// Writes a sibling temp file, then renames it over the store file.
    fn persist(&self, values: &Document) -> OptionsResult<()> {
        let json = serde_json::to_vec_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .and_then(|()| std::fs::rename(&tmp, &self.path))
            .map_err(|e| OptionsError::Storage(format!("failed to write {:?}: {e}", self.path)))
    }
}

impl ValueStore for JsonFileValueStore {
    fn get(&self, owner: &OwnerId, field: &Field) -> OptionsResult<Option<Value>> {
        let values = self.guard()?;
        Ok(values
            .get(owner.as_str())
            .and_then(|fields| fields.get(&field.key))
            .cloned())
    }

    fn set(&self, owner: &OwnerId, field: &Field, value: Value) -> OptionsResult<()> {
        let mut values = self.guard()?;
        let previous = values
            .entry(owner.to_string())
            .or_default()
            .insert(field.key.clone(), value);
        if let Err(e) = self.persist(&values) {
            // Keep memory in step with the file.
            let fields = values.entry(owner.to_string()).or_default();
            match previous {
                Some(old) => {
                    fields.insert(field.key.clone(), old);
                }
                None => {
                    fields.remove(&field.key);
                }
            }
            return Err(e);
        }
        debug!("Stored {} for {}", field.key, owner);
        Ok(())
    }
}
