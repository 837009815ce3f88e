//! Visual encoding of earthquake attributes.
//!
//! Magnitude drives the marker radius, significance drives the fill color.
//! The legend is generated from the same bucket table the markers are
//! colored with, so the two can never disagree on boundaries.

use serde::Serialize;

use crate::constants::{MAGNITUDE_SCALE, MIN_MARKER_RADIUS};

/// One significance range and its display color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Exclusive lower bound; the lowest bucket also takes everything below it.
    pub lower: f64,
    pub color: &'static str,
}

/// Ascending significance buckets.
pub const BUCKETS: [Bucket; 7] = [
    Bucket { lower: 0.0, color: "#ffffff" },
    Bucket { lower: 200.0, color: "#DC7633" },
    Bucket { lower: 300.0, color: "#FFEE58" },
    Bucket { lower: 400.0, color: "#00FF33" },
    Bucket { lower: 500.0, color: "#29B6F6" },
    Bucket { lower: 600.0, color: "#8E24AA" },
    Bucket { lower: 700.0, color: "#C62828" },
];

/// Circle size for a magnitude: `magnitude * 3.5`.
///
/// Negative magnitudes and NaN count as zero; the result saturates at
/// `f64::MAX` instead of overflowing to infinity.
pub fn marker_size(magnitude: f64) -> f64 {
    if magnitude.is_nan() {
        return 0.0;
    }
    (magnitude.max(0.0) * MAGNITUDE_SCALE).min(f64::MAX)
}

/// Radius actually drawn: [`marker_size`] floored at the minimum visible radius.
pub fn marker_radius(magnitude: f64) -> f64 {
    marker_size(magnitude).max(MIN_MARKER_RADIUS)
}

/// Index into [`BUCKETS`] for a significance value.
pub fn bucket_index(significance: f64) -> usize {
    // Strict `>`: a value sitting on a boundary belongs to the bucket below.
    // NaN compares false everywhere and lands in bucket 0.
    BUCKETS
        .iter()
        .rposition(|b| b.lower > 0.0 && significance > b.lower)
        .unwrap_or(0)
}

/// Fill color for a significance value.
pub fn significance_color(significance: f64) -> &'static str {
    BUCKETS[bucket_index(significance)].color
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

/// Legend rows in ascending order: "0–200", "200–300", ..., "700+".
pub fn legend_entries() -> Vec<LegendEntry> {
    BUCKETS
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let label = match BUCKETS.get(i + 1) {
                Some(next) => format!("{}\u{2013}{}", bucket.lower, next.lower),
                None => format!("{}+", bucket.lower),
            };
            LegendEntry {
                color: significance_color(bucket.lower + 1.0),
                label,
            }
        })
        .collect()
}
