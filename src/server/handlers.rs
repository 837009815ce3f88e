use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;
use serde::Serialize;
use tracing::warn;

use crate::encoding::{legend_entries, LegendEntry};
use crate::error::QuakeMapError;
use crate::feed::FeedMetadata;
use crate::html_template::get_map_html;
use crate::map::MapConfig;
use crate::marker::{build_markers, Marker};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

#[derive(Serialize)]
pub struct MarkersResponse {
    pub status: &'static str,
    pub metadata: Option<FeedMetadata>,
    pub count: usize,
    pub markers: Vec<Marker>,
}

impl IntoResponse for QuakeMapError {
    fn into_response(self) -> Response {
        let status = match self {
            QuakeMapError::NetworkFailure { .. } | QuakeMapError::MalformedFeed(_) => {
                StatusCode::BAD_GATEWAY
            }
            QuakeMapError::MissingCredential { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "status": "error",
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn index_html(State(state): State<AppState>) -> Html<String> {
    get_map_html(&state.map)
}

pub async fn style_css() -> Response {
    embedded_asset("style.css", "text/css")
}

pub async fn script_js() -> Response {
    embedded_asset("script.js", "application/javascript")
}

fn embedded_asset(name: &str, content_type: &'static str) -> Response {
    match Asset::get(name) {
        Some(content) => (
            [(header::CONTENT_TYPE, content_type)],
            content.data.into_owned(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// API endpoint with the assembled map description
pub async fn get_map_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.map.as_ref().clone())
}

pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(legend_entries())
}

/// Fetches the feed once and returns one marker per feature.
pub async fn get_markers(
    State(state): State<AppState>,
) -> Result<Json<MarkersResponse>, QuakeMapError> {
    let feed = state.feed.fetch().await.map_err(|e| {
        warn!(kind = e.kind(), "❌ {}", e);
        e
    })?;

    let markers = build_markers(&feed.features);
    Ok(Json(MarkersResponse {
        status: "ok",
        metadata: feed.metadata,
        count: markers.len(),
        markers,
    }))
}
