#![allow(dead_code)]

use posttype_options_admin::{build_router, AppState};
use posttype_options_core::{
    InMemoryContentTypes, InMemoryFieldGroups, InMemoryValueStore, OptionsPage, OptionsSettings,
    ValueStore,
};
use posttype_options_model::{ContentType, Field, FieldGroup, LocationRule};
use std::sync::Arc;

pub fn content_types() -> Vec<ContentType> {
    vec![
        ContentType::new("post", "Posts"),
        ContentType::new("event", "Events").with_archive("/events/"),
        ContentType::new("attachment", "Media"),
    ]
}

pub fn event_details_group() -> FieldGroup {
    FieldGroup::new("101", "Event details")
        .with_field(Field::text("subtitle", "subtitle", "Subtitle"))
        .with_location(vec![LocationRule::equals("post_type_options", "all")])
}

pub fn page_only_group() -> FieldGroup {
    FieldGroup::new("201", "Page hero")
        .with_field(Field::text("hero", "hero", "Hero"))
        .with_location(vec![LocationRule::equals("post_type", "page")])
}

pub fn test_state(groups: Vec<FieldGroup>, store: Arc<dyn ValueStore>) -> Arc<AppState> {
    let page = OptionsPage::new(
        OptionsSettings::default(),
        Arc::new(InMemoryFieldGroups::new(groups)),
        Arc::new(InMemoryContentTypes::new(content_types())),
        store,
    );
    Arc::new(AppState::new(page).unwrap())
}

pub struct TestServer {
    pub base: String,
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryValueStore>,
}

impl TestServer {
    pub fn settings_url(&self) -> String {
        format!("{}/settings/acf-post-type-options", self.base)
    }

    pub fn token(&self) -> String {
        self.state.page.tokens().issue()
    }
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_test_server(groups: Vec<FieldGroup>) -> TestServer {
    let store = Arc::new(InMemoryValueStore::new());
    let state = test_state(groups, store.clone());
    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        state,
        store,
    }
}
