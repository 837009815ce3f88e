use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::{MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT};
use crate::encoding::{marker_radius, significance_color};
use crate::feed::Feature;

// Render-ready circle marker, serialized straight into Leaflet options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: f64,
    pub color: &'static str,
    pub popup_html: String,
}

impl Marker {
    pub fn from_feature(feature: &Feature) -> Self {
        Marker {
            id: feature.id.clone(),
            lat: feature.lat,
            lng: feature.lon,
            radius: marker_radius(feature.magnitude.unwrap_or(0.0)),
            fill_color: significance_color(feature.significance),
            fill_opacity: MARKER_FILL_OPACITY,
            weight: MARKER_STROKE_WEIGHT,
            color: MARKER_STROKE_COLOR,
            popup_html: popup_html(feature),
        }
    }
}

/// Converts every feature into a marker, keeping feed order.
pub fn build_markers(features: &[Feature]) -> Vec<Marker> {
    features.par_iter().map(Marker::from_feature).collect()
}

/// Formats an epoch-millisecond timestamp as e.g. `Tue Nov 14 2023 22:13:20 UTC`.
pub fn format_event_time(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
        None => format!("{} ms since epoch", millis),
    }
}

fn popup_html(feature: &Feature) -> String {
    let magnitude = match feature.magnitude {
        Some(m) => m.to_string(),
        None => "unknown".to_string(),
    };
    format!(
        "<h3>Earthquake: {}</h3><hr><p>Time: {}</p><hr><p>Magnitude: {}</p><hr><p>Significance: {}</p>",
        htmlize::escape_text(feature.place.as_str()),
        format_event_time(feature.time),
        magnitude,
        feature.significance
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MIN_MARKER_RADIUS;

    fn quake(place: &str, magnitude: f64, significance: f64) -> Feature {
        Feature {
            id: None,
            place: place.to_string(),
            time: 1_700_000_000_000,
            magnitude: Some(magnitude),
            significance,
            lat: 35.0,
            lon: -118.0,
            depth_km: Some(8.0),
        }
    }

    #[test]
    fn marker_carries_encoding_and_style() {
        let m = Marker::from_feature(&quake("Ridgecrest, CA", 4.0, 650.0));
        assert_eq!(m.radius, 14.0);
        assert_eq!(m.fill_color, "#8E24AA");
        assert_eq!((m.lat, m.lng), (35.0, -118.0));
        assert_eq!(m.fill_opacity, 0.8);
        assert_eq!(m.weight, 0.5);
        assert_eq!(m.color, "black");
    }

    #[test]
    fn popup_lists_all_attributes() {
        let m = Marker::from_feature(&quake("Ridgecrest, CA", 4.5, 312.0));
        assert!(m.popup_html.contains("Earthquake: Ridgecrest, CA"));
        assert!(m.popup_html.contains("Time: Tue Nov 14 2023 22:13:20 UTC"));
        assert!(m.popup_html.contains("Magnitude: 4.5"));
        assert!(m.popup_html.contains("Significance: 312"));
    }

    #[test]
    fn unknown_magnitude_is_shown_as_unknown() {
        let feature = Feature {
            magnitude: None,
            ..quake("Offshore Oregon", 0.0, 12.0)
        };
        let m = Marker::from_feature(&feature);
        assert!(m.popup_html.contains("Magnitude: unknown"));
        assert_eq!(m.radius, MIN_MARKER_RADIUS);
    }

    #[test]
    fn popup_escapes_place() {
        let m = Marker::from_feature(&quake("<script>alert(1)</script>", 1.0, 1.0));
        assert!(!m.popup_html.contains("<script>"));
        assert!(m.popup_html.contains("&lt;script&gt;"));
    }

    #[test]
    fn one_marker_per_feature_in_order() {
        let features: Vec<_> = (0..250)
            .map(|i| quake(&format!("event {}", i), i as f64 / 50.0, i as f64 * 3.0))
            .collect();
        let markers = build_markers(&features);
        assert_eq!(markers.len(), features.len());
        for (i, m) in markers.iter().enumerate() {
            assert!(m.popup_html.contains(&format!("Earthquake: event {}<", i)));
        }
    }

    #[test]
    fn out_of_range_time_does_not_panic() {
        assert_eq!(format_event_time(i64::MAX), format!("{} ms since epoch", i64::MAX));
    }
}
