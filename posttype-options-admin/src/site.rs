//! Site definition file: the content types and field groups a standalone
//! admin server exposes.
//!
//! ```json
//! {
//!   "content_types": [{ "name": "event", "labels": { "name": "Events" } }],
//!   "field_groups": [{ "id": "101", "title": "Event details", "fields": [], "location": [] }]
//! }
//! ```

use posttype_options_core::{
    InMemoryContentTypes, InMemoryFieldGroups, OptionsError, OptionsResult,
};
use posttype_options_model::{ContentType, FieldGroup};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDefinition {
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub field_groups: Vec<FieldGroup>,
}

impl SiteDefinition {
    pub fn from_json(contents: &str) -> OptionsResult<Self> {
        serde_json::from_str(contents)
            .map_err(|e| OptionsError::Config(format!("invalid site definition: {e}")))
    }

    /// Reads a site definition. Unlike settings, a site file is required.
    pub fn load(path: &Path) -> OptionsResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OptionsError::Config(format!("failed to read site definition {path:?}: {e}"))
        })?;
        let site = Self::from_json(&contents)?;
        info!(
            "Loaded {} content types and {} field groups from {:?}",
            site.content_types.len(),
            site.field_groups.len(),
            path
        );
        Ok(site)
    }

    /// Splits the definition into the registries the options page reads.
    pub fn into_registries(self) -> (InMemoryFieldGroups, InMemoryContentTypes) {
        (
            InMemoryFieldGroups::new(self.field_groups),
            InMemoryContentTypes::new(self.content_types),
        )
    }
}
