mod common;

use common::{event_details_group, page_only_group, spawn_test_server};
use posttype_options_admin::RegionsResponse;
use posttype_options_core::owner_id;
use pretty_assertions::assert_eq;
use serde_json::json;

// ── GET /settings/{slug} ─────────────────────────────────────────

#[tokio::test]
async fn settings_page_renders_one_section_per_content_type() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let resp = reqwest::get(server.settings_url()).await.unwrap();
    assert_eq!(resp.status(), 200);

    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("text/html"));

    let body = resp.text().await.unwrap();
    assert!(body.contains("<h2>Post Type Options</h2>"));
    assert!(body.contains("id=\"post-type-post\""));
    assert!(body.contains("id=\"post-type-event\""));
    assert!(!body.contains("post-type-attachment"));
    assert!(body.contains("name=\"fields[subtitle___event]\""));
    assert!(body.contains("id=\"acf_101_post\""));
    assert!(body.contains("href=\"&#x2f;events&#x2f;\""));
    assert!(body.contains("&#x2f;wp-admin&#x2f;edit.php?post_type=event"));
    assert!(body.contains("name=\"acf_nonce\""));
}

#[tokio::test]
async fn settings_page_empty_state() {
    let server = spawn_test_server(vec![page_only_group()]).await;
    let body = reqwest::get(server.settings_url())
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("No Custom Field Group found for the options page"));
    assert!(body.contains("&#x2f;wp-admin&#x2f;post-new.php?post_type=acf"));
    assert!(!body.contains("<form"));
}

#[tokio::test]
async fn other_slug_returns_404() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let resp = reqwest::get(format!("{}/settings/general", server.base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = spawn_test_server(vec![]).await;
    let resp = reqwest::get(format!("{}/api/v1/nonexistent", server.base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

// ── POST /settings/{slug} ────────────────────────────────────────

#[tokio::test]
async fn post_saves_and_shows_notice() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let token = server.token();
    let resp = reqwest::Client::new()
        .post(server.settings_url())
        .form(&[
            ("acf_nonce", token.as_str()),
            ("fields[subtitle___event]", "Keynote"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Post Type Options Updated"));
    assert!(body.contains("value=\"Keynote\""));

    let snapshot = server.store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(
        snapshot[&(owner_id("event"), "subtitle".to_string())],
        json!("Keynote")
    );
}

#[tokio::test]
async fn post_with_bad_token_saves_nothing() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let resp = reqwest::Client::new()
        .post(server.settings_url())
        .form(&[
            ("acf_nonce", "forged.token"),
            ("fields[subtitle___event]", "Keynote"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(!body.contains("Post Type Options Updated"));
    assert!(body.contains("id=\"post-type-event\""));
    assert!(server.store.is_empty());
}

#[tokio::test]
async fn post_without_fields_shows_no_notice() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let token = server.token();
    let body = reqwest::Client::new()
        .post(server.settings_url())
        .form(&[("acf_nonce", token.as_str())])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("Post Type Options Updated"));
}

#[tokio::test]
async fn posted_markup_is_escaped() {
    let server = spawn_test_server(vec![event_details_group()]).await;
    let token = server.token();
    let body = reqwest::Client::new()
        .post(server.settings_url())
        .form(&[
            ("acf_nonce", token.as_str()),
            ("fields[subtitle___post]", "<script>alert(1)</script>"),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}

// ── GET /api/v1/regions ──────────────────────────────────────────

#[tokio::test]
async fn regions_endpoint_lists_regions() {
    let server = spawn_test_server(vec![event_details_group(), page_only_group()]).await;
    let resp = reqwest::get(format!("{}/api/v1/regions", server.base))
        .await
        .unwrap();
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let body: RegionsResponse = resp.json().await.unwrap();
    let RegionsResponse::Regions { regions } = body else {
        panic!("expected regions");
    };
    let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["acf_101_post", "acf_101_event"]);
    assert_eq!(regions[1].owner_id, "post_type_option_event");
    assert_eq!(regions[1].placement, "normal-event");
    assert_eq!(regions[1].title, "Event details");
}

#[tokio::test]
async fn regions_endpoint_empty_state() {
    let server = spawn_test_server(vec![page_only_group()]).await;
    let body: RegionsResponse = reqwest::get(format!("{}/api/v1/regions", server.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        RegionsResponse::Empty {
            message: "No Custom Field Group found for the options page".to_string(),
        }
    );
}
