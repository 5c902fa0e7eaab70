//! Settings for the options screen, read from an optional TOML file.
//!
//! ```toml
//! [options]
//! title = "Post Type Options"
//! menu-slug = "acf-post-type-options"
//! excluded-content-types = ["attachment"]
//! token-action = "input"
//! token-lifetime-secs = 86400
//! admin-url = "/wp-admin/"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Screen id prefix the host gives pages registered under Settings.
const SETTINGS_SCREEN_PREFIX: &str = "settings_page_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSettings {
    /// Page title and menu label.
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_menu_slug")]
    pub menu_slug: String,
    /// Content types never given an option set.
    #[serde(default = "default_excluded")]
    pub excluded_content_types: Vec<String>,
    #[serde(default = "default_token_action")]
    pub token_action: String,
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: i64,
    /// Base of the host's admin links, with a trailing slash.
    #[serde(default = "default_admin_url")]
    pub admin_url: String,
}

fn default_title() -> String {
    "Post Type Options".to_string()
}

fn default_menu_slug() -> String {
    "acf-post-type-options".to_string()
}

fn default_excluded() -> Vec<String> {
    vec!["attachment".to_string()]
}

fn default_token_action() -> String {
    "input".to_string()
}

fn default_token_lifetime() -> i64 {
    24 * 60 * 60
}

fn default_admin_url() -> String {
    "/wp-admin/".to_string()
}

impl Default for OptionsSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            menu_slug: default_menu_slug(),
            excluded_content_types: default_excluded(),
            token_action: default_token_action(),
            token_lifetime_secs: default_token_lifetime(),
            admin_url: default_admin_url(),
        }
    }
}

/// Raw TOML structure.
#[derive(Deserialize)]
struct SettingsFile {
    #[serde(default)]
    options: OptionsSettings,
}

impl OptionsSettings {
    /// Id of the settings screen, the value a [`crate::RequestContext`] must
    /// carry for the options rule to match.
    pub fn screen_id(&self) -> String {
        format!("{SETTINGS_SCREEN_PREFIX}{}", self.menu_slug)
    }

    /// Admin link listing every entry of a content type.
    pub fn all_items_url(&self, content_type: &str) -> String {
        format!("{}edit.php?post_type={content_type}", self.admin_url)
    }

    /// Admin link for creating a new field group.
    pub fn create_field_group_url(&self) -> String {
        format!("{}post-new.php?post_type=acf", self.admin_url)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<SettingsFile>(contents).map(|file| file.options)
    }

    /// Loads settings from `path`.
    /// Falls back to defaults when the file is missing, unreadable or invalid.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(settings) => {
                    info!("Loaded options settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "Failed to parse settings file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
