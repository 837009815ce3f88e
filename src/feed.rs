use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::constants::USER_AGENT;
use crate::error::QuakeMapError;

/// One earthquake event, reduced to the attributes the map consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub place: String,
    /// Event time in milliseconds since the Unix epoch
    pub time: i64,
    /// `None` when the feed publishes a null magnitude
    pub magnitude: Option<f64>,
    pub significance: f64,
    pub lat: f64,
    pub lon: f64,
    pub depth_km: Option<f64>,
}

/// The feed's own `metadata` block. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<Feature>,
}

// Wire shapes of a GeoJSON feature as published by USGS
#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<String>,
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawProperties {
    // null for some automatic solutions
    mag: Option<f64>,
    sig: f64,
    place: Option<String>,
    time: i64,
}

#[derive(Deserialize)]
struct RawGeometry {
    coordinates: Vec<f64>,
}

const UNKNOWN_PLACE: &str = "Unknown location";

impl Feature {
    fn from_value(index: usize, value: &serde_json::Value) -> Result<Self, QuakeMapError> {
        let raw = RawFeature::deserialize(value)
            .map_err(|e| QuakeMapError::MalformedFeed(format!("feature {}: {}", index, e)))?;

        let (lon, lat) = match raw.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => {
                return Err(QuakeMapError::MalformedFeed(format!(
                    "feature {}: expected [lon, lat] coordinates, got {} values",
                    index,
                    raw.geometry.coordinates.len()
                )))
            }
        };

        let place = raw
            .properties
            .place
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string());

        Ok(Feature {
            id: raw.id,
            place,
            time: raw.properties.time,
            magnitude: raw.properties.mag,
            significance: raw.properties.sig,
            lat,
            lon,
            depth_km: raw.geometry.coordinates.get(2).copied(),
        })
    }
}

/// Parses a GeoJSON feature collection body.
///
/// The document must be an object with a `features` array, and every element
/// needs `properties.{sig, time}` and at least two coordinates. A single bad
/// feature rejects the whole feed.
pub fn parse_feed(body: &str) -> Result<Feed, QuakeMapError> {
    let doc: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| QuakeMapError::MalformedFeed(format!("body is not valid JSON: {}", e)))?;

    let features = doc
        .get("features")
        .ok_or_else(|| QuakeMapError::MalformedFeed("missing `features` key".to_string()))?
        .as_array()
        .ok_or_else(|| QuakeMapError::MalformedFeed("`features` is not an array".to_string()))?;

    let metadata = doc
        .get("metadata")
        .and_then(|m| FeedMetadata::deserialize(m).ok());

    let features = features
        .iter()
        .enumerate()
        .map(|(i, value)| Feature::from_value(i, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Feed { metadata, features })
}

/// HTTP client for the earthquake feed. Cheap to clone.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FeedClient {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs one GET against the feed. No retries.
    pub async fn fetch(&self) -> Result<Feed, QuakeMapError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuakeMapError::network(&self.url, e))?;

        let status = response.status();
        debug!(url = %self.url, status = %status, "feed responded");

        if !status.is_success() {
            return Err(QuakeMapError::network(
                &self.url,
                format!("unexpected status {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuakeMapError::network(&self.url, e))?;
        let feed = parse_feed(&body)?;

        info!(
            url = %self.url,
            features = feed.features.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "🌍 feed fetched"
        );
        Ok(feed)
    }
}
