use axum::response::Html;

use crate::map::MapConfig;

/// Renders the map page with the map configuration inlined.
pub fn get_map_html(config: &MapConfig) -> Html<String> {
    Html(render_map_html(config))
}

pub fn render_map_html(config: &MapConfig) -> String {
    // serde_json never fails on these types; fall back to an empty object anyway
    let json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());
    MAP_HTML.replace("/* MAP_CONFIG_PLACEHOLDER */", &script_safe(&json))
}

// Keeps the JSON from closing the surrounding <script> element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

// HTML template for the map page
const MAP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QuakeMap - Recent Earthquakes</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <link rel="stylesheet" href="/style.css" />
</head>
<body>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        window.QUAKEMAP_CONFIG = /* MAP_CONFIG_PLACEHOLDER */;
    </script>
    <script src="/script.js"></script>
</body>
</html>"#;
