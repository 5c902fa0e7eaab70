//! Per post type option sets for field groups.
//!
//! A single field group definition is shown once per public content type on
//! one settings screen, and every copy saves to its own storage owner. This
//! crate handles:
//! - Key namespacing: `field_key___content_type` form keys and
//!   `post_type_option_<type>` storage owners
//! - Applicability: the `post_type_options == all` location rule
//! - The cross product of matching field groups × content types, the save
//!   dispatch of posted values, and the render model of the settings page
//! - Time-bounded save-authorization tokens
//!
//! # Design Principles
//!
//! - **No globals**: rule dispatch and the current screen are explicit values
//! - **Skip, never abort**: a malformed key or a vanished field only drops
//!   that one entry
//! - **Two steps**: `compute_regions` is pure with respect to storage,
//!   `render` reads values lazily

mod config;
mod error;
mod keys;
mod memory;
mod page;
mod registry;
mod rules;
mod token;

pub use config::OptionsSettings;
pub use error::{OptionsError, OptionsResult};
pub use keys::{
    decode, encode, owner_id, try_encode, KeyParts, NamespacedKey, OwnerId, KEY_SEPARATOR,
    OWNER_ID_PREFIX,
};
pub use memory::{InMemoryContentTypes, InMemoryFieldGroups, InMemoryValueStore};
pub use page::{
    Notice, NoticeKind, OptionsPage, Page, PageBody, Region, RegionPlan, RenderedField,
    RenderedRegion, SaveOutcome, SaveReport, Section, SkipReason, SkippedEntry, Submission,
    EMPTY_STATE_MESSAGE, SAVED_MESSAGE,
};
pub use registry::{ContentTypeRegistry, FieldGroupRegistry, ValueStore};
pub use rules::{
    LocationRuleKind, PostTypeOptionsRule, RequestContext, RuleChoice, RuleTable, RuleTypeGroup,
    POST_TYPE_OPTIONS_PARAM, POST_TYPE_OPTIONS_VALUE,
};
pub use token::{TokenIssuer, TokenPayload};
