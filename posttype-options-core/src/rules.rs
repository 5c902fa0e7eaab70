//! Location rule dispatch.
//!
//! Field groups declare where they appear through [`LocationRule`]s. Each
//! rule `param` is evaluated by a [`LocationRuleKind`] registered in a
//! [`RuleTable`]; this crate contributes [`PostTypeOptionsRule`], which
//! claims `post_type_options` and matches only on the settings screen.

use posttype_options_model::{FieldGroup, LocationRule, RuleOperator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Rule `param` handled by [`PostTypeOptionsRule`].
pub const POST_TYPE_OPTIONS_PARAM: &str = "post_type_options";

/// The only value [`PostTypeOptionsRule`] offers.
pub const POST_TYPE_OPTIONS_VALUE: &str = "all";

/// What the current request is looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub is_admin: bool,
    pub screen_id: Option<String>,
}

impl RequestContext {
    /// An admin request for the screen with the given id.
    pub fn admin_screen(screen_id: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            screen_id: Some(screen_id.into()),
        }
    }

    /// A public (non-admin) request.
    pub fn front_end() -> Self {
        Self::default()
    }

    pub fn is_screen(&self, screen_id: &str) -> bool {
        self.is_admin && self.screen_id.as_deref() == Some(screen_id)
    }
}

/// A value offered for a rule kind in the location editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChoice {
    pub value: String,
    pub label: String,
}

impl RuleChoice {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Rule kinds of one category, as listed in the location editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTypeGroup {
    pub category: String,
    pub kinds: Vec<RuleChoice>,
}

/// Evaluates one rule `param`.
pub trait LocationRuleKind: Send + Sync {
    /// The `param` this kind claims.
    fn name(&self) -> &str;

    /// Human-readable name for the location editor.
    fn label(&self) -> &str;

    /// Category heading in the location editor.
    fn category(&self) -> &str {
        "Other"
    }

    /// Values a rule of this kind may compare against.
    fn values(&self) -> Vec<RuleChoice> {
        Vec::new()
    }

    /// Whether `rule` holds in `ctx`. Only called for rules whose `param`
    /// equals [`LocationRuleKind::name`].
    fn matches(&self, rule: &LocationRule, ctx: &RequestContext) -> bool;
}

/// Shows a group on the per post type options screen.
///
/// Matches only `post_type_options == all`, and only for an admin request
/// to `screen_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTypeOptionsRule {
    screen_id: String,
}

impl PostTypeOptionsRule {
    pub fn new(screen_id: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
        }
    }

    pub fn screen_id(&self) -> &str {
        &self.screen_id
    }
}

impl LocationRuleKind for PostTypeOptionsRule {
    fn name(&self) -> &str {
        POST_TYPE_OPTIONS_PARAM
    }

    fn label(&self) -> &str {
        "Post Types Options"
    }

    fn values(&self) -> Vec<RuleChoice> {
        vec![RuleChoice::new(POST_TYPE_OPTIONS_VALUE, "All Post Types")]
    }

    fn matches(&self, rule: &LocationRule, ctx: &RequestContext) -> bool {
        if rule.param != POST_TYPE_OPTIONS_PARAM || !ctx.is_screen(&self.screen_id) {
            return false;
        }
        rule.operator == RuleOperator::Equal && rule.value == POST_TYPE_OPTIONS_VALUE
    }
}

/// Registry of rule kinds keyed by `param`.
#[derive(Default)]
pub struct RuleTable {
    kinds: BTreeMap<String, Box<dyn LocationRuleKind>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding only [`PostTypeOptionsRule`] for `screen_id`.
    pub fn with_post_type_options(screen_id: impl Into<String>) -> Self {
        let mut table = Self::new();
        table.register(PostTypeOptionsRule::new(screen_id));
        table
    }

    /// Registers a rule kind, replacing any kind with the same name.
    pub fn register<K: LocationRuleKind + 'static>(&mut self, kind: K) {
        self.kinds.insert(kind.name().to_string(), Box::new(kind));
    }

    pub fn get(&self, name: &str) -> Option<&dyn LocationRuleKind> {
        self.kinds.get(name).map(|k| k.as_ref())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Registered kinds grouped by category, categories and kinds sorted by name.
    pub fn rule_types(&self) -> Vec<RuleTypeGroup> {
        let mut groups: BTreeMap<&str, Vec<RuleChoice>> = BTreeMap::new();
        for kind in self.kinds.values() {
            groups
                .entry(kind.category())
                .or_default()
                .push(RuleChoice::new(kind.name(), kind.label()));
        }
        groups
            .into_iter()
            .map(|(category, kinds)| RuleTypeGroup {
                category: category.to_string(),
                kinds,
            })
            .collect()
    }

    /// Values offered for a rule kind, empty if the kind is unknown.
    pub fn rule_values(&self, name: &str) -> Vec<RuleChoice> {
        self.get(name).map(|k| k.values()).unwrap_or_default()
    }

    /// Evaluates one rule. Rules of unregistered kinds never match.
    pub fn rule_matches(&self, rule: &LocationRule, ctx: &RequestContext) -> bool {
        match self.get(&rule.param) {
            Some(kind) => kind.matches(rule, ctx),
            None => false,
        }
    }

    /// Whether any OR branch of the group's location has all its rules matching.
    pub fn group_matches(&self, group: &FieldGroup, ctx: &RequestContext) -> bool {
        group
            .location
            .iter()
            .any(|branch| !branch.is_empty() && branch.iter().all(|r| self.rule_matches(r, ctx)))
    }

    /// Ids of the groups that apply to `ctx`, in input order.
    pub fn match_field_groups(&self, groups: &[FieldGroup], ctx: &RequestContext) -> Vec<String> {
        let matched: Vec<String> = groups
            .iter()
            .filter(|g| self.group_matches(g, ctx))
            .map(|g| g.id.clone())
            .collect();
        debug!(
            "Matched {} of {} field groups for screen {:?}",
            matched.len(),
            groups.len(),
            ctx.screen_id
        );
        matched
    }
}
