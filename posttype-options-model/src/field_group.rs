use crate::{Field, LocationRule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named collection of fields, shown wherever its location rules match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub options: FieldGroupOptions,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Disjunction of conjunctions: the group applies when every rule of at
    /// least one inner list matches. An empty list never matches.
    #[serde(default)]
    pub location: Vec<Vec<LocationRule>>,
}

impl FieldGroup {
    /// Creates an empty group with default options and no location rules.
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options: FieldGroupOptions::default(),
            fields: Vec::new(),
            location: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_options(mut self, options: FieldGroupOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds an OR branch containing the given rules.
    pub fn with_location(mut self, rules: Vec<LocationRule>) -> Self {
        self.location.push(rules);
        self
    }

    /// Looks up a field of this group by its (un-namespaced) key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Presentation options of a field group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroupOptions {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub position: Position,
}

impl FieldGroupOptions {
    pub fn new(layout: Layout, position: Position) -> Self {
        Self { layout, position }
    }
}

/// How the group's box chrome is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Default,
    NoBox,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NoBox => "no_box",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The layout column a group is placed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    AcfAfterTitle,
    #[default]
    Normal,
    Side,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcfAfterTitle => "acf_after_title",
            Self::Normal => "normal",
            Self::Side => "side",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
