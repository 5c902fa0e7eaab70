//! Namespaced form keys and storage owner identifiers.
//!
//! The same field definition is rendered once per content type on the
//! settings screen, so its key is suffixed with the content type name:
//! `field_key___content_type`. Values are stored under the owner
//! `post_type_option_<content_type>` with the original field key.

use crate::error::{OptionsError, OptionsResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Joins a field key and a content type name.
pub const KEY_SEPARATOR: &str = "___";

/// Prefix of every storage owner managed by this crate.
pub const OWNER_ID_PREFIX: &str = "post_type_option_";

/// A field key made unique across content types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespacedKey(String);

impl NamespacedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Splits this key back into its parts.
    pub fn parts(&self) -> OptionsResult<KeyParts<'_>> {
        decode(&self.0)
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NamespacedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The two halves of a decoded [`NamespacedKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyParts<'a> {
    pub field_key: &'a str,
    pub content_type: &'a str,
}

/// Builds the namespaced key for `(field_key, content_type)`.
///
/// Total: if either input contains [`KEY_SEPARATOR`] the result will not
/// decode back to the same pair. Use [`try_encode`] to reject such input.
pub fn encode(field_key: &str, content_type: &str) -> NamespacedKey {
    NamespacedKey(format!("{field_key}{KEY_SEPARATOR}{content_type}"))
}

/// Like [`encode`], but refuses any pair whose key would not [`decode`]
/// back to exactly `(field_key, content_type)`.
///
/// Besides empty segments and segments containing the separator, this
/// rejects a field key ending in `_`: the trailing underscore merges with
/// the separator and shifts the split.
pub fn try_encode(field_key: &str, content_type: &str) -> OptionsResult<NamespacedKey> {
    let key = encode(field_key, content_type);
    let roundtrips = matches!(
        decode(key.as_str()),
        Ok(parts) if parts.field_key == field_key && parts.content_type == content_type
    );
    if !roundtrips {
        let field_key_at_fault = field_key.is_empty()
            || field_key.contains(KEY_SEPARATOR)
            || field_key.ends_with('_');
        let segment = if field_key_at_fault { field_key } else { content_type };
        return Err(OptionsError::SeparatorCollision(segment.to_string()));
    }
    Ok(key)
}

/// Splits a posted key on [`KEY_SEPARATOR`].
///
/// Exactly two non-empty segments are required; anything else is
/// [`OptionsError::MalformedKey`]. Callers skip malformed keys.
pub fn decode(key: &str) -> OptionsResult<KeyParts<'_>> {
    let mut segments = key.split(KEY_SEPARATOR);
    match (segments.next(), segments.next(), segments.next()) {
        (Some(field_key), Some(content_type), None)
            if !field_key.is_empty() && !content_type.is_empty() =>
        {
            Ok(KeyParts {
                field_key,
                content_type,
            })
        }
        _ => Err(OptionsError::MalformedKey(key.to_string())),
    }
}

/// Storage owner of one content type's option set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    #[must_use]
    pub fn for_content_type(content_type: &str) -> Self {
        Self(format!("{OWNER_ID_PREFIX}{content_type}"))
    }

    /// Parses an owner string, accepting only ids this crate would produce.
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix(OWNER_ID_PREFIX)
            .filter(|name| !name.is_empty())
            .map(|_| Self(s.to_string()))
    }

    /// Returns the content type this owner belongs to.
    pub fn content_type(&self) -> &str {
        self.0.strip_prefix(OWNER_ID_PREFIX).unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = OptionsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or(OptionsError::UnknownContentType(s))
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}

/// Shorthand for [`OwnerId::for_content_type`].
pub fn owner_id(content_type: &str) -> OwnerId {
    OwnerId::for_content_type(content_type)
}
