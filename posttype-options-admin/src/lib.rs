//! HTTP admin surface for per post type option sets.
//!
//! Routes:
//! - `GET /settings/{menu_slug}`: the options page
//! - `POST /settings/{menu_slug}`: save the posted form, then render the page
//! - `GET /api/v1/regions`: the computed regions as JSON

pub mod html;
pub mod site;
pub mod store;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use posttype_options_core::{OptionsPage, Page, RegionPlan, Submission};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

pub use html::PageRenderer;
pub use site::SiteDefinition;
pub use store::JsonFileValueStore;

/// Form field carrying the save-authorization token.
pub const TOKEN_FIELD: &str = "acf_nonce";

/// Shared state of every handler.
pub struct AppState {
    pub page: OptionsPage,
    pub renderer: PageRenderer,
}

impl AppState {
    pub fn new(page: OptionsPage) -> anyhow::Result<Self> {
        Ok(Self {
            page,
            renderer: PageRenderer::new()?,
        })
    }
}

/// One computed region, as listed by `/api/v1/regions`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RegionSummary {
    pub id: String,
    pub title: String,
    pub content_type: String,
    pub owner_id: String,
    pub placement: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegionsResponse {
    Empty { message: String },
    Regions { regions: Vec<RegionSummary> },
}

impl RegionsResponse {
    fn from_plan(plan: &RegionPlan) -> Self {
        match plan {
            RegionPlan::NoApplicableGroups => Self::Empty {
                message: posttype_options_core::EMPTY_STATE_MESSAGE.to_string(),
            },
            RegionPlan::Regions(regions) => Self::Regions {
                regions: regions
                    .iter()
                    .map(|r| RegionSummary {
                        id: r.id(),
                        title: r.field_group.title.clone(),
                        content_type: r.content_type.name.clone(),
                        owner_id: r.owner_id.to_string(),
                        placement: r.placement(),
                    })
                    .collect(),
            },
        }
    }
}

/// Builds a [`Submission`] from url-encoded pairs.
///
/// `acf_nonce` becomes the token and every `fields[<key>]` entry a string
/// value under `<key>`. Other pairs are ignored.
pub fn parse_submission(pairs: Vec<(String, String)>) -> Submission {
    let mut submission = Submission::unsigned();
    for (name, value) in pairs {
        if name == TOKEN_FIELD {
            submission.token = Some(value);
        } else if let Some(key) = name
            .strip_prefix("fields[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            submission.fields.push((key.to_string(), Value::String(value)));
        } else {
            debug!("Ignoring form field {name}");
        }
    }
    submission
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    error!("Request failed: {e}");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

async fn serve_page(
    state: Arc<AppState>,
    slug: String,
    submission: Option<Submission>,
) -> Response {
    if slug != state.page.settings().menu_slug {
        return StatusCode::NOT_FOUND.into_response();
    }

    let action = format!("/settings/{slug}");
    let worker = state.clone();
    let page: Result<Page, _> = tokio::task::spawn_blocking(move || {
        let now = chrono::Utc::now().timestamp();
        let ctx = worker.page.screen_context();
        worker.page.handle_request(&ctx, submission.as_ref(), now)
    })
    .await
    .map_err(internal_error)
    .and_then(|page| page.map_err(internal_error));

    match page {
        Ok(page) => match state.renderer.render(&page, &action) {
            Ok(html) => Html(html).into_response(),
            Err(e) => internal_error(e),
        },
        Err(response) => response,
    }
}

async fn settings_page(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    serve_page(state, slug, None).await
}

async fn save_settings(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    serve_page(state, slug, Some(parse_submission(pairs))).await
}

async fn regions_handler(State(state): State<Arc<AppState>>) -> Json<RegionsResponse> {
    let plan = state.page.compute_regions(&state.page.screen_context());
    Json(RegionsResponse::from_plan(&plan))
}

/// Build the HTTP router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/settings/{slug}", get(settings_page).post(save_settings))
        .route("/api/v1/regions", get(regions_handler))
        .with_state(state)
}
