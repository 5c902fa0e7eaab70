use serde::{Deserialize, Serialize};

/// A content (post) type registered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub name: String,
    #[serde(default)]
    pub labels: ContentTypeLabels,
    #[serde(default = "default_public")]
    pub public: bool,
    /// Public archive URL, if the host gives this type an archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_link: Option<String>,
}

fn default_public() -> bool {
    true
}

impl ContentType {
    /// Creates a public content type whose labels are derived from `plural`.
    pub fn new(name: &str, plural: &str) -> Self {
        Self {
            name: name.into(),
            labels: ContentTypeLabels::from_plural(plural),
            public: true,
            archive_link: None,
        }
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn with_archive(mut self, link: &str) -> Self {
        self.archive_link = Some(link.into());
        self
    }
}

/// Display labels for a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeLabels {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub singular_name: String,
    #[serde(default)]
    pub all_items: String,
}

impl ContentTypeLabels {
    fn from_plural(plural: &str) -> Self {
        Self {
            name: plural.into(),
            singular_name: plural.trim_end_matches('s').into(),
            all_items: format!("All {plural}"),
        }
    }
}
