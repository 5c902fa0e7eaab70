use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single field definition inside a field group.
///
/// `key` is unique across the host's field registry. Everything the
/// rendering widget needs beyond the common columns (choices, placeholder,
/// default value, ...) is kept in `attributes` and flattened back into the
/// field object when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

fn default_field_type() -> String {
    "text".to_string()
}

impl Field {
    /// Creates a field with no widget-specific attributes.
    pub fn new(key: &str, name: &str, label: &str, field_type: &str) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            label: label.into(),
            field_type: field_type.into(),
            attributes: Map::new(),
        }
    }

    /// Shorthand for a plain text field.
    pub fn text(key: &str, name: &str, label: &str) -> Self {
        Self::new(key, name, label, "text")
    }

    /// Adds a widget attribute, replacing any previous value.
    pub fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Returns a copy of this field addressed by a different key.
    pub fn rekeyed(&self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self.clone()
        }
    }

    /// Extract a string attribute.
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).and_then(|v| v.as_str())
    }

    /// Extract a boolean attribute.
    pub fn get_bool(&self, attribute: &str) -> Option<bool> {
        self.attributes.get(attribute).and_then(|v| v.as_bool())
    }
}
