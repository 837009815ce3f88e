use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::constants::PORTS_TO_CHECK;

pub mod handlers;
pub mod state;

pub use self::state::AppState;
use handlers::{get_legend, get_map_config, get_markers, index_html, script_js, style_css};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/script.js", get(script_js))
        .route("/api/config", get(get_map_config))
        .route("/api/legend", get(get_legend))
        .route("/api/markers", get(get_markers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Binds on localhost, trying `preferred` first and then the fallback ports.
pub async fn bind(preferred: u16) -> Result<TcpListener> {
    let mut candidates = vec![preferred];
    candidates.extend(PORTS_TO_CHECK.iter().copied().filter(|p| *p != preferred));

    let mut last_error = None;
    for port in candidates {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                warn!("⚠️  Port {} unavailable: {}", port, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .map(anyhow::Error::from)
        .unwrap_or_else(|| anyhow::anyhow!("no port to bind")))
    .context("Failed to bind HTTP server")
}

pub async fn start_server(listener: TcpListener, state: AppState) -> Result<()> {
    let app = create_app(state);
    info!("✅ HTTP server started at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("🛑 Shutting down");
    }
}
