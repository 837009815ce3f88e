use anyhow::{Context, Result};
use tracing::info;

use quakemap::feed::FeedClient;
use quakemap::map::MapConfig;
use quakemap::server::{self, AppState};
use quakemap::settings::Settings;
use quakemap::{logging, utils};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    info!("🗺️  QuakeMap v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        "⚙️  Settings: {}",
        serde_json::to_string(&settings).unwrap_or_default()
    );

    // Refuse to serve a map whose tiles cannot load
    let access_token = settings.access_token()?;

    let map = MapConfig::assemble(access_token);
    let feed = FeedClient::new(settings.feed_url.clone(), settings.request_timeout())?;
    info!("🌍 Earthquake feed: {}", feed.url());

    let listener = server::bind(settings.port).await?;
    let url = format!("http://{}", listener.local_addr()?);
    if settings.auto_open_browser {
        utils::open_in_browser(&url);
    }

    server::start_server(listener, AppState::new(map, feed)).await
}
