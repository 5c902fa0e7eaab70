//! Data model for per post type options.
//!
//! Defines the plain types the options core reads from its host registries:
//! - [`Field`]: a single field definition (key, name, label, widget attributes)
//! - [`FieldGroup`]: a named collection of fields with layout options and location rules
//! - [`LocationRule`]: a declarative `param operator value` condition deciding where a group shows
//! - [`ContentType`]: a registered post type and its labels
//!
//! These types are owned by the host. The options core never mutates them
//! except to rewrite field keys on its own copies before rendering.

mod content_type;
mod field;
mod field_group;
mod location;

pub use content_type::{ContentType, ContentTypeLabels};
pub use field::Field;
pub use field_group::{FieldGroup, FieldGroupOptions, Layout, Position};
pub use location::{LocationRule, RuleOperator};
