//! Error types for the options core.

use thiserror::Error;

/// Errors raised while namespacing keys, saving or rendering option sets.
///
/// Most variants never escape the save loop: they are recorded as the reason
/// a single posted entry was skipped.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A posted key does not split into exactly two non-empty segments.
    #[error("malformed namespaced key: {0}")]
    MalformedKey(String),

    /// A field key or content type name would produce an undecodable key.
    #[error("key segment collides with the separator: {0}")]
    SeparatorCollision(String),

    /// No field with this key exists in the field registry.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// No field group with this id exists in the field group registry.
    #[error("unknown field group: {0}")]
    UnknownFieldGroup(String),

    /// The content type is not (or no longer) a public, listed type.
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    /// The save-authorization token is missing, forged or expired.
    #[error("save authorization failed: {0}")]
    Authorization(String),

    /// The value store rejected a read or a write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Settings could not be read.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for options operations.
pub type OptionsResult<T> = Result<T, OptionsError>;
