//! Host collaborator interfaces: field group definitions, content types and
//! value persistence.

use crate::error::OptionsResult;
use crate::keys::OwnerId;
use crate::rules::{RequestContext, RuleTable};
use posttype_options_model::{ContentType, Field, FieldGroup, FieldGroupOptions};
use serde_json::Value;

/// Host-owned source of field group definitions.
///
/// Definitions are read fresh on every request; nothing here is cached by
/// the options core.
pub trait FieldGroupRegistry: Send + Sync {
    /// All field groups, in the host's order.
    fn list_field_groups(&self) -> Vec<FieldGroup>;

    /// Fields of a group, or `None` if the group no longer exists.
    fn get_fields(&self, group_id: &str) -> Option<Vec<Field>> {
        self.list_field_groups()
            .into_iter()
            .find(|g| g.id == group_id)
            .map(|g| g.fields)
    }

    /// Presentation options of a group, or `None` if it no longer exists.
    fn get_options(&self, group_id: &str) -> Option<FieldGroupOptions> {
        self.list_field_groups()
            .into_iter()
            .find(|g| g.id == group_id)
            .map(|g| g.options)
    }

    /// Resolves a field by its original key across all groups.
    fn load_field(&self, field_key: &str) -> Option<Field> {
        self.list_field_groups()
            .into_iter()
            .flat_map(|g| g.fields)
            .find(|f| f.key == field_key)
    }

    /// Ids of the groups whose location rules match `ctx`.
    fn match_field_groups(&self, rules: &RuleTable, ctx: &RequestContext) -> Vec<String> {
        rules.match_field_groups(&self.list_field_groups(), ctx)
    }
}

/// Host-owned list of registered content types.
pub trait ContentTypeRegistry: Send + Sync {
    /// Public content types, in registration order, minus any whose name is
    /// in `exclude`.
    fn list_public_content_types(&self, exclude: &[String]) -> Vec<ContentType>;
}

/// Flat persistence addressed by `(owner, field.key)`.
///
/// `field` always carries its original, un-namespaced key.
pub trait ValueStore: Send + Sync {
    fn get(&self, owner: &OwnerId, field: &Field) -> OptionsResult<Option<Value>>;

    fn set(&self, owner: &OwnerId, field: &Field, value: Value) -> OptionsResult<()>;
}
