// Port configuration
pub const DEFAULT_PORT: u16 = 3001;
pub const ALTERNATIVE_PORT: u16 = 3002;
pub const PORTS_TO_CHECK: &[u16] = &[DEFAULT_PORT, ALTERNATIVE_PORT];

// USGS summary feed: every event of magnitude 1.0+ from the past 30 days
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_month.geojson";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

// Initial view
pub const MAP_CENTER: [f64; 2] = [16.97, -7.99];
pub const MAP_ZOOM: f64 = 1.5;

// Marker encoding
pub const MAGNITUDE_SCALE: f64 = 3.5;
pub const MIN_MARKER_RADIUS: f64 = 2.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;
pub const MARKER_STROKE_WEIGHT: f64 = 0.5;
pub const MARKER_STROKE_COLOR: &str = "black";

// Layer names shown in the layer control
pub const STREET_LAYER: &str = "Street Map";
pub const LIGHT_LAYER: &str = "Light";
pub const DARK_LAYER: &str = "Dark";
pub const EARTHQUAKE_OVERLAY: &str = "Earthquakes";

pub const LEGEND_TITLE: &str = "EQ Significance";
pub const LEGEND_POSITION: &str = "bottomright";

// Mapbox raster tiles. {accessToken} is filled in by Leaflet from the layer options.
pub const MAPBOX_STYLE_URL: &str =
    "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
pub const MAPBOX_CLASSIC_URL: &str =
    "https://api.mapbox.com/styles/v1/mapbox/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
pub const TILE_MAX_ZOOM: u8 = 18;

pub const CONFIG_FILE_NAME: &str = "quakemap.ini";
