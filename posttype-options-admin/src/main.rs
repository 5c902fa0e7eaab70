//! Per post type options admin server
//!
//! Serves the options screen for the content types and field groups of a
//! site definition file, storing values in a JSON file.
//!
//! Usage:
//!   posttype-options-admin --site site.json --store values.json --port 8080

use anyhow::{Context, Result};
use clap::Parser;
use posttype_options_admin::{build_router, AppState, JsonFileValueStore, SiteDefinition};
use posttype_options_core::{OptionsPage, OptionsSettings};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "posttype-options-admin")]
#[command(about = "Admin server for per post type option sets")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Site definition (content types and field groups), JSON
    #[arg(short, long, default_value = "site.json")]
    site: PathBuf,

    /// Value store file, created on first save
    #[arg(long, default_value = "post-type-options.json")]
    store: PathBuf,

    /// Settings file, TOML; defaults apply when missing
    #[arg(short, long, default_value = "post-type-options.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Post type options admin starting...");
    let settings = OptionsSettings::load_from(&args.config);
    let site = SiteDefinition::load(&args.site).context("Failed to load site definition")?;
    let (field_groups, content_types) = site.into_registries();
    let store = JsonFileValueStore::open(&args.store).context("Failed to open value store")?;

    let slug = settings.menu_slug.clone();
    let page = OptionsPage::new(
        settings,
        Arc::new(field_groups),
        Arc::new(content_types),
        Arc::new(store),
    );
    let state = Arc::new(AppState::new(page).context("Failed to compile page template")?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .context("Failed to bind HTTP port")?;
    info!(
        "Options page at http://0.0.0.0:{}/settings/{}",
        args.port, slug
    );
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
