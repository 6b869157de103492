// Output emitter: serializes camp records into the standalone map page

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::MapConfig;
use crate::error::Result;
use crate::pipeline::ingestion::IconAsset;
use crate::types::CampRecord;

const MAP_TEMPLATE: &str = include_str!("map_template.html");

/// Page-level settings rendered into the template
#[derive(Debug, Clone)]
pub struct MapPage {
    pub title: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub leaflet_css: String,
    pub leaflet_js: String,
}

impl From<&MapConfig> for MapPage {
    fn from(config: &MapConfig) -> Self {
        Self {
            title: config.title.clone(),
            center_lat: config.center_lat,
            center_lng: config.center_lng,
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
            leaflet_css: config.leaflet_css.clone(),
            leaflet_js: config.leaflet_js.clone(),
        }
    }
}

impl Default for MapPage {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

/// The two marker icons embedded in the page
#[derive(Debug, Clone)]
pub struct MapIcons {
    pub tent: IconAsset,
    pub wolf: IconAsset,
}

/// Render the complete HTML document. Output depends only on the inputs.
pub fn render_html(
    records: &[CampRecord],
    icons: &MapIcons,
    page: &MapPage,
    source_digest: &str,
) -> Result<String> {
    let camps_json = script_safe(&serde_json::to_string_pretty(records)?);

    let values: HashMap<&str, String> = HashMap::from([
        ("SOURCE_DIGEST", source_digest.to_string()),
        ("TITLE", escape_html(&page.title)),
        ("LEAFLET_CSS", escape_html(&page.leaflet_css)),
        ("LEAFLET_JS", escape_html(&page.leaflet_js)),
        ("CAMPS_JSON", camps_json),
        ("TENT_ICON", escape_js_string(&icons.tent.data_uri)),
        ("WOLF_ICON", escape_js_string(&icons.wolf.data_uri)),
        ("CENTER_LAT", page.center_lat.to_string()),
        ("CENTER_LNG", page.center_lng.to_string()),
        ("ZOOM", page.zoom.to_string()),
        ("TILE_URL", escape_js_string(&page.tile_url)),
        ("TILE_ATTRIBUTION", escape_js_string(&page.tile_attribution)),
    ]);

    let html = fill_template(MAP_TEMPLATE, &values);
    debug!("Rendered page: {} records, {} bytes", records.len(), html.len());
    Ok(html)
}

/// Pretty-printed JSON array of the records
pub fn render_json(records: &[CampRecord]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// Substitute `{{KEY}}` placeholders in a single pass, so substituted text
/// is never scanned for further placeholders
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len() + values.values().map(String::len).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        warn!("Unknown template placeholder '{}'", key);
                        out.push_str(&rest[start..start + 2 + end + 2]);
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Keep embedded JSON from terminating the surrounding script element.
/// `<` only occurs inside JSON strings, where `\u003c` reads back the same.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape for a single-quoted JavaScript string literal inside a script element
fn escape_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            _ => out.push(c),
        }
    }
    out
}
