//! The per post type options screen: region computation, save dispatch and
//! the render model.
//!
//! One request runs [`OptionsPage::handle_request`]:
//! 1. save the posted values, if any and if the token verifies
//! 2. [`OptionsPage::compute_regions`]: matching field groups × public content types
//! 3. [`OptionsPage::render`]: namespace field keys and read current values

use crate::config::OptionsSettings;
use crate::error::{OptionsError, OptionsResult};
use crate::keys::{self, OwnerId};
use crate::registry::{ContentTypeRegistry, FieldGroupRegistry, ValueStore};
use crate::rules::{PostTypeOptionsRule, RequestContext, RuleTable};
use crate::token::TokenIssuer;
use posttype_options_model::{ContentType, Field, FieldGroup, Layout, Position};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Notice shown after a save, whatever the number of updated values.
pub const SAVED_MESSAGE: &str = "Post Type Options Updated";

/// Message of the empty state.
pub const EMPTY_STATE_MESSAGE: &str = "No Custom Field Group found for the options page";

/// One field group shown for one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub field_group: FieldGroup,
    pub content_type: ContentType,
    pub owner_id: OwnerId,
}

impl Region {
    fn new(field_group: FieldGroup, content_type: ContentType) -> Self {
        let owner_id = OwnerId::for_content_type(&content_type.name);
        Self {
            field_group,
            content_type,
            owner_id,
        }
    }

    /// Unique box id, `acf_<group id>_<content type>`.
    pub fn id(&self) -> String {
        format!("acf_{}_{}", self.field_group.id, self.content_type.name)
    }

    pub fn position(&self) -> Position {
        self.field_group.options.position
    }

    /// Placement context, `<position>-<content type>`. Regions sharing a
    /// placement are drawn in the same column of the same section.
    pub fn placement(&self) -> String {
        format!("{}-{}", self.position(), self.content_type.name)
    }
}

/// Result of the setup phase.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionPlan {
    /// No field group matches the screen; nothing is read or written.
    NoApplicableGroups,
    Regions(Vec<Region>),
}

impl RegionPlan {
    pub fn regions(&self) -> &[Region] {
        match self {
            Self::NoApplicableGroups => &[],
            Self::Regions(regions) => regions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regions().is_empty()
    }
}

/// A posted options form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// The save-authorization token rendered into the form.
    pub token: Option<String>,
    /// Namespaced key → value, in posted order.
    pub fields: Vec<(String, Value)>,
}

impl Submission {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            fields: Vec::new(),
        }
    }

    /// A submission without a token.
    pub fn unsigned() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.push((key.to_string(), value));
        self
    }
}

/// Why a posted entry was not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    MalformedKey,
    UnknownContentType,
    UnknownField,
    StoreFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub key: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// What a save did, entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub updated: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl SaveReport {
    fn skip(&mut self, key: &str, reason: SkipReason) {
        self.skipped.push(SkippedEntry {
            key: key.to_string(),
            reason,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The form carried no fields; nothing was attempted.
    NothingSubmitted,
    Saved(SaveReport),
}

impl SaveOutcome {
    /// The notice to surface for this outcome.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::NothingSubmitted => None,
            Self::Saved(_) => Some(Notice::updated()),
        }
    }
}

/// An informational message at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Updated,
}

impl Notice {
    pub fn updated() -> Self {
        Self {
            kind: NoticeKind::Updated,
            message: SAVED_MESSAGE.to_string(),
        }
    }
}

/// Render model of the options page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub notice: Option<Notice>,
    /// Token to embed in the form; required to save.
    pub save_token: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageBody {
    Empty {
        message: String,
        create_group_url: String,
    },
    Sections {
        sections: Vec<Section>,
    },
}

/// Every region of one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub content_type: String,
    pub heading: String,
    pub archive_url: Option<String>,
    pub all_items_url: String,
    pub all_items_label: String,
    /// In registration order.
    pub regions: Vec<RenderedRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRegion {
    pub id: String,
    pub title: String,
    pub placement: String,
    pub position: Position,
    pub layout: Layout,
    pub owner_id: OwnerId,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    /// The field definition with its key namespaced to this region's type.
    pub field: Field,
    pub original_key: String,
    pub value: Option<Value>,
}

/// The options screen wired to its host collaborators.
pub struct OptionsPage {
    settings: OptionsSettings,
    rules: RuleTable,
    tokens: TokenIssuer,
    field_groups: Arc<dyn FieldGroupRegistry>,
    content_types: Arc<dyn ContentTypeRegistry>,
    values: Arc<dyn ValueStore>,
}

impl OptionsPage {
    /// Creates the page with a rule table holding only the options rule and
    /// a freshly keyed token issuer.
    pub fn new(
        settings: OptionsSettings,
        field_groups: Arc<dyn FieldGroupRegistry>,
        content_types: Arc<dyn ContentTypeRegistry>,
        values: Arc<dyn ValueStore>,
    ) -> Self {
        let rules = RuleTable::with_post_type_options(settings.screen_id());
        let tokens = TokenIssuer::generate(&settings.token_action, settings.token_lifetime_secs);
        Self {
            settings,
            rules,
            tokens,
            field_groups,
            content_types,
            values,
        }
    }

    /// Uses a host rule table. The options rule is registered into it.
    pub fn with_rules(mut self, mut rules: RuleTable) -> Self {
        rules.register(PostTypeOptionsRule::new(self.settings.screen_id()));
        self.rules = rules;
        self
    }

    pub fn with_token_issuer(mut self, tokens: TokenIssuer) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn settings(&self) -> &OptionsSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Context of a request to this page's screen.
    pub fn screen_context(&self) -> RequestContext {
        RequestContext::admin_screen(self.settings.screen_id())
    }

    fn listed_content_types(&self) -> Vec<ContentType> {
        self.content_types
            .list_public_content_types(&self.settings.excluded_content_types)
            .into_iter()
            .filter(|ct| {
                let usable = !ct.name.is_empty() && !ct.name.contains(keys::KEY_SEPARATOR);
                if !usable {
                    warn!("Skipping content type {:?}: name cannot be namespaced", ct.name);
                }
                usable
            })
            .collect()
    }

    /// Matching field groups × listed content types, content types outermost.
    pub fn compute_regions(&self, ctx: &RequestContext) -> RegionPlan {
        let matched: HashSet<String> = self
            .field_groups
            .match_field_groups(&self.rules, ctx)
            .into_iter()
            .collect();
        if matched.is_empty() {
            debug!("No field groups apply to {:?}", ctx.screen_id);
            return RegionPlan::NoApplicableGroups;
        }

        let groups = self.field_groups.list_field_groups();
        let mut regions = Vec::new();
        for content_type in self.listed_content_types() {
            for group in groups.iter().filter(|g| matched.contains(&g.id)) {
                let mut group = group.clone();
                if let Some(options) = self.field_groups.get_options(&group.id) {
                    group.options = options;
                }
                regions.push(Region::new(group, content_type.clone()));
            }
        }
        debug!("Registered {} regions", regions.len());
        RegionPlan::Regions(regions)
    }

    /// Verifies the token and writes every decodable entry.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Authorization`] when the token is missing or
    /// does not verify; nothing is written in that case. Per-entry problems
    /// never fail the save, they are listed in the [`SaveReport`].
    pub fn save(&self, submission: &Submission, now: i64) -> OptionsResult<SaveOutcome> {
        let token = submission
            .token
            .as_deref()
            .ok_or_else(|| OptionsError::Authorization("missing token".to_string()))?;
        self.tokens.verify_at(token, now)?;

        if submission.fields.is_empty() {
            return Ok(SaveOutcome::NothingSubmitted);
        }

        let known_types: HashSet<String> = self
            .listed_content_types()
            .into_iter()
            .map(|ct| ct.name)
            .collect();

        let mut report = SaveReport::default();
        for (key, value) in &submission.fields {
            let parts = match keys::decode(key) {
                Ok(parts) => parts,
                Err(e) => {
                    debug!("Skipping posted entry: {e}");
                    report.skip(key, SkipReason::MalformedKey);
                    continue;
                }
            };
            if !known_types.contains(parts.content_type) {
                debug!("Skipping {key}: unknown content type {}", parts.content_type);
                report.skip(key, SkipReason::UnknownContentType);
                continue;
            }
            let Some(field) = self.field_groups.load_field(parts.field_key) else {
                debug!("Skipping {key}: unknown field {}", parts.field_key);
                report.skip(key, SkipReason::UnknownField);
                continue;
            };

            let owner = OwnerId::for_content_type(parts.content_type);
            match self.values.set(&owner, &field, value.clone()) {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    warn!("Failed to store {key} for {owner}: {e}");
                    report.skip(key, SkipReason::StoreFailed(e.to_string()));
                }
            }
        }

        info!(
            "Saved post type options: {} updated, {} skipped",
            report.updated,
            report.skipped.len()
        );
        Ok(SaveOutcome::Saved(report))
    }

    /// Builds the render model, reading values at the current time.
    pub fn render(&self, plan: &RegionPlan, notice: Option<Notice>) -> OptionsResult<Page> {
        self.render_at(plan, notice, chrono::Utc::now().timestamp())
    }

    /// Builds the render model; the embedded token is issued at `now`.
    ///
    /// # Errors
    ///
    /// Only value store read failures are returned. Regions whose group has
    /// disappeared are dropped.
    pub fn render_at(
        &self,
        plan: &RegionPlan,
        notice: Option<Notice>,
        now: i64,
    ) -> OptionsResult<Page> {
        let body = match plan {
            RegionPlan::NoApplicableGroups => PageBody::Empty {
                message: EMPTY_STATE_MESSAGE.to_string(),
                create_group_url: self.settings.create_field_group_url(),
            },
            RegionPlan::Regions(regions) => PageBody::Sections {
                sections: self.render_sections(regions)?,
            },
        };

        Ok(Page {
            title: self.settings.title.clone(),
            notice,
            save_token: self.tokens.issue_at(now),
            body,
        })
    }

    fn render_sections(&self, regions: &[Region]) -> OptionsResult<Vec<Section>> {
        let mut sections: Vec<Section> = Vec::new();
        for region in regions {
            let Some(rendered) = self.render_region(region)? else {
                continue;
            };
            let name = &region.content_type.name;
            match sections.iter_mut().find(|s| &s.content_type == name) {
                Some(section) => section.regions.push(rendered),
                None => {
                    let mut section = self.section_for(&region.content_type);
                    section.regions.push(rendered);
                    sections.push(section);
                }
            }
        }
        Ok(sections)
    }

    fn section_for(&self, content_type: &ContentType) -> Section {
        Section {
            content_type: content_type.name.clone(),
            heading: content_type.labels.name.clone(),
            archive_url: content_type.archive_link.clone(),
            all_items_url: self.settings.all_items_url(&content_type.name),
            all_items_label: content_type.labels.all_items.clone(),
            regions: Vec::new(),
        }
    }

    fn render_region(&self, region: &Region) -> OptionsResult<Option<RenderedRegion>> {
        let group = &region.field_group;
        let Some(fields) = self.field_groups.get_fields(&group.id) else {
            let err = OptionsError::UnknownFieldGroup(group.id.clone());
            warn!("Skipping region {}: {err}", region.id());
            return Ok(None);
        };

        let mut rendered = Vec::with_capacity(fields.len());
        for field in fields {
            let key = match keys::try_encode(&field.key, &region.content_type.name) {
                Ok(key) => key,
                Err(e) => {
                    warn!("Skipping field in region {}: {e}", region.id());
                    continue;
                }
            };
            let value = self.values.get(&region.owner_id, &field)?;
            rendered.push(RenderedField {
                field: field.rekeyed(key.into_string()),
                original_key: field.key,
                value,
            });
        }

        Ok(Some(RenderedRegion {
            id: region.id(),
            title: group.title.clone(),
            placement: region.placement(),
            position: region.position(),
            layout: group.options.layout,
            owner_id: region.owner_id.clone(),
            fields: rendered,
        }))
    }

    /// Serves one request to the options screen: save, then set up, then render.
    ///
    /// A failed authorization aborts the save only; the page is still rendered.
    pub fn handle_request(
        &self,
        ctx: &RequestContext,
        submission: Option<&Submission>,
        now: i64,
    ) -> OptionsResult<Page> {
        let notice = match submission {
            Some(submission) => match self.save(submission, now) {
                Ok(outcome) => outcome.notice(),
                Err(e) => {
                    warn!("Save aborted: {e}");
                    None
                }
            },
            None => None,
        };

        let plan = self.compute_regions(ctx);
        self.render_at(&plan, notice, now)
    }
}
