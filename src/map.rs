//! Map assembly: view, base layers, overlay and legend.
//!
//! Everything here is plain data. The browser script turns it into Leaflet
//! objects; nothing in this module talks to the network.

use serde::Serialize;

use crate::constants::*;
use crate::encoding::{legend_entries, LegendEntry};

const MAPBOX_STREETS_ATTRIBUTION: &str = "© <a href='https://www.mapbox.com/about/maps/'>Mapbox</a> © <a href='http://www.openstreetmap.org/copyright'>OpenStreetMap</a> <strong><a href='https://www.mapbox.com/map-feedback/' target='_blank'>Improve this map</a></strong>";
const MAPBOX_CLASSIC_ATTRIBUTION: &str = "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, Imagery © <a href=\"https://www.mapbox.com/\">Mapbox</a>";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub id: &'static str,
    pub max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_offset: Option<i32>,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub position: &'static str,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub collapsed: bool,
}

/// Complete description of the page's map, handed to the browser as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub view: MapView,
    /// Mutually exclusive; the first one is shown on load.
    pub base_layers: Vec<TileLayer>,
    /// Toggleable overlays, all shown on load.
    pub overlays: Vec<&'static str>,
    pub layer_control: LayerControl,
    pub legend: Legend,
}

impl MapConfig {
    /// Builds the map description. The token must already be validated.
    pub fn assemble(access_token: &str) -> Self {
        MapConfig {
            view: MapView {
                center: MAP_CENTER,
                zoom: MAP_ZOOM,
            },
            base_layers: base_layers(access_token),
            overlays: vec![EARTHQUAKE_OVERLAY],
            layer_control: LayerControl { collapsed: false },
            legend: Legend {
                title: LEGEND_TITLE,
                position: LEGEND_POSITION,
                entries: legend_entries(),
            },
        }
    }
}

fn base_layers(access_token: &str) -> Vec<TileLayer> {
    vec![
        TileLayer {
            name: STREET_LAYER,
            url_template: MAPBOX_STYLE_URL,
            attribution: MAPBOX_STREETS_ATTRIBUTION,
            id: "mapbox/streets-v11",
            max_zoom: TILE_MAX_ZOOM,
            tile_size: Some(512),
            zoom_offset: Some(-1),
            access_token: access_token.to_string(),
        },
        TileLayer {
            name: LIGHT_LAYER,
            url_template: MAPBOX_CLASSIC_URL,
            attribution: MAPBOX_CLASSIC_ATTRIBUTION,
            id: "light-v10",
            max_zoom: TILE_MAX_ZOOM,
            tile_size: None,
            zoom_offset: None,
            access_token: access_token.to_string(),
        },
        TileLayer {
            name: DARK_LAYER,
            url_template: MAPBOX_CLASSIC_URL,
            attribution: MAPBOX_CLASSIC_ATTRIBUTION,
            id: "dark-v10",
            max_zoom: TILE_MAX_ZOOM,
            tile_size: None,
            zoom_offset: None,
            access_token: access_token.to_string(),
        },
    ]
}
