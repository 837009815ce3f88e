//! Recent-earthquake map: fetches the USGS GeoJSON feed, encodes each event
//! as a circle marker and serves a Leaflet page that draws them.

pub mod constants;
pub mod encoding;
pub mod error;
pub mod feed;
pub mod html_template;
pub mod logging;
pub mod map;
pub mod marker;
pub mod server;
pub mod settings;
pub mod utils;

pub use error::QuakeMapError;
