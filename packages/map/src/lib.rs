#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for generating interactive district map documents.
//!
//! Renders a district's incidents as a self-contained Leaflet HTML file,
//! either a density heatmap or a per-incident scatter map, centered on
//! the district centroid. Incident data is injected into the document as
//! a JSON payload, so district names and incident types can never break
//! the markup. Written files open in the system browser.

mod template;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fir_map_incident_models::IncidentRecord;
use geo::Point;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Heat point radius in pixels.
pub const HEAT_POINT_RADIUS: u32 = 10;

/// Opacity applied to the heat layer canvas.
pub const HEAT_LAYER_OPACITY: f64 = 0.8;

/// Minimum intensity of the heat color scale.
pub const HEAT_MIN_INTENSITY: f64 = 0.0;

/// Scatter marker radius in pixels.
pub const SCATTER_MARKER_RADIUS: u32 = 9;

/// Initial zoom level for both map kinds.
pub const MAP_ZOOM: u8 = 10;

/// Fixed canvas width in pixels.
pub const MAP_WIDTH: u32 = 1_000;

/// Fixed canvas height in pixels.
pub const MAP_HEIGHT: u32 = 800;

/// Viridis color ramp used by the heatmap gradient.
const VIRIDIS_GRADIENT: [(&str, &str); 5] = [
    ("0.0", "#440154"),
    ("0.25", "#3b528b"),
    ("0.5", "#21918c"),
    ("0.75", "#5ec962"),
    ("1.0", "#fde725"),
];

/// Which map variant to render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MapKind {
    /// Density-weighted heatmap on a Carto Positron basemap.
    Heatmap,
    /// One circle marker per incident on an OpenStreetMap basemap.
    Scatter,
}

impl MapKind {
    /// Returns the document title for a district's map.
    #[must_use]
    pub fn title_for(self, district: &str) -> String {
        match self {
            Self::Heatmap => format!("Crime Heatmap for {district}"),
            Self::Scatter => format!("Crime Map for {district}"),
        }
    }

    /// Returns the basemap tile URL and attribution for this variant.
    #[must_use]
    pub const fn tile_layer(self) -> (&'static str, &'static str) {
        match self {
            Self::Heatmap => (
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
                "&copy; OpenStreetMap contributors &copy; CARTO",
            ),
            Self::Scatter => (
                "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
                "&copy; OpenStreetMap contributors",
            ),
        }
    }
}

/// Errors that can occur while rendering or writing map documents.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The map document could not be written to disk.
    #[error("Failed to write map document: {0}")]
    Io(#[from] std::io::Error),

    /// The map payload could not be serialized.
    #[error("Failed to encode map data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapPayload<'a> {
    title: String,
    kind: MapKind,
    center: PayloadCenter,
    zoom: u8,
    width: u32,
    height: u32,
    tiles: PayloadTiles,
    #[serde(skip_serializing_if = "Option::is_none")]
    heat: Option<PayloadHeat>,
    marker_radius: u32,
    points: Vec<PayloadPoint<'a>>,
}

#[derive(Serialize)]
struct PayloadCenter {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct PayloadTiles {
    url: &'static str,
    attribution: &'static str,
}

#[derive(Serialize)]
struct PayloadHeat {
    radius: u32,
    opacity: f64,
    min: f64,
    gradient: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
struct PayloadPoint<'a> {
    latitude: f64,
    longitude: f64,
    label: &'a str,
}

/// Renders the map document for one district.
///
/// `center` is the district centroid in `geo`'s (x = longitude,
/// y = latitude) convention.
///
/// # Errors
///
/// Returns an error if the map payload cannot be serialized.
pub fn render_map(
    district: &str,
    kind: MapKind,
    records: &[&IncidentRecord],
    center: Point<f64>,
) -> Result<String, RenderError> {
    let heat = match kind {
        MapKind::Heatmap => Some(PayloadHeat {
            radius: HEAT_POINT_RADIUS,
            opacity: HEAT_LAYER_OPACITY,
            min: HEAT_MIN_INTENSITY,
            gradient: VIRIDIS_GRADIENT.into_iter().collect(),
        }),
        MapKind::Scatter => None,
    };

    let payload = MapPayload {
        title: kind.title_for(district),
        kind,
        center: PayloadCenter {
            latitude: center.y(),
            longitude: center.x(),
        },
        zoom: MAP_ZOOM,
        width: MAP_WIDTH,
        height: MAP_HEIGHT,
        tiles: {
            let (url, attribution) = kind.tile_layer();
            PayloadTiles { url, attribution }
        },
        heat,
        marker_radius: SCATTER_MARKER_RADIUS,
        points: records
            .iter()
            .map(|record| PayloadPoint {
                latitude: record.latitude,
                longitude: record.longitude,
                label: record.fir_type.as_str(),
            })
            .collect(),
    };

    // Escape `</` so payload strings cannot terminate the data script tag.
    let data = serde_json::to_string(&payload)?.replace("</", "<\\/");

    log::debug!(
        "Rendered {kind} document for '{district}' with {} points",
        records.len()
    );

    Ok(template::MAP_HTML.replace(template::MAP_DATA_PLACEHOLDER, &data))
}

/// Derives a filesystem-safe slug from a district name.
fn district_slug(district: &str) -> String {
    let mut slug = String::with_capacity(district.len());
    for ch in district.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "district".to_owned()
    } else {
        slug.to_owned()
    }
}

/// Returns the output file name for a district's map document.
#[must_use]
pub fn map_file_name(district: &str, kind: MapKind) -> String {
    format!("{}-{kind}.html", district_slug(district))
}

/// Writes a rendered map document into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_map(
    dir: &Path,
    district: &str,
    kind: MapKind,
    html: &str,
) -> Result<PathBuf, RenderError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(map_file_name(district, kind));
    std::fs::write(&path, html)?;
    log::info!("Wrote {kind} map to {}", path.display());
    Ok(path)
}

/// Opens a written map document with the system browser.
///
/// # Errors
///
/// Returns an error if no system handler could be launched.
pub fn open_map(path: &Path) -> std::io::Result<()> {
    open::that(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(latitude: f64, longitude: f64, fir_type: &str) -> IncidentRecord {
        IncidentRecord {
            district: "Mysuru".to_owned(),
            latitude,
            longitude,
            fir_type: fir_type.to_owned(),
        }
    }

    fn payload_of(html: &str) -> serde_json::Value {
        let marker = "<script id=\"map-data\" type=\"application/json\">";
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn heatmap_document_carries_every_point_and_the_fixed_layout() {
        let records = vec![
            record(12.9716, 77.5946, "Theft"),
            record(12.9720, 77.5950, "Assault"),
        ];
        let rows: Vec<&IncidentRecord> = records.iter().collect();
        let html = render_map(
            "Bengaluru City",
            MapKind::Heatmap,
            &rows,
            Point::new(77.5948, 12.9718),
        )
        .unwrap();

        let payload = payload_of(&html);
        assert_eq!(payload["title"], "Crime Heatmap for Bengaluru City");
        assert_eq!(payload["kind"], "heatmap");
        assert_eq!(payload["zoom"], 10);
        assert_eq!(payload["width"], 1000);
        assert_eq!(payload["height"], 800);
        assert_eq!(payload["points"].as_array().unwrap().len(), 2);
        assert_eq!(payload["heat"]["radius"], 10);
        assert!((payload["heat"]["opacity"].as_f64().unwrap() - 0.8).abs() < f64::EPSILON);
        assert!(
            payload["tiles"]["url"]
                .as_str()
                .unwrap()
                .contains("cartocdn")
        );
    }

    #[test]
    fn scatter_document_uses_osm_tiles_and_marker_radius() {
        let records = vec![record(12.2958, 76.6394, "Robbery")];
        let rows: Vec<&IncidentRecord> = records.iter().collect();
        let html = render_map(
            "Mysuru",
            MapKind::Scatter,
            &rows,
            Point::new(76.6394, 12.2958),
        )
        .unwrap();

        let payload = payload_of(&html);
        assert_eq!(payload["title"], "Crime Map for Mysuru");
        assert_eq!(payload["kind"], "scatter");
        assert_eq!(payload["markerRadius"], 9);
        assert!(payload.get("heat").is_none());
        assert!(
            payload["tiles"]["url"]
                .as_str()
                .unwrap()
                .contains("openstreetmap")
        );
    }

    #[test]
    fn centroid_lands_in_the_center_field() {
        let records = vec![record(10.0, 20.0, "Theft")];
        let rows: Vec<&IncidentRecord> = records.iter().collect();
        let html = render_map("Mysuru", MapKind::Scatter, &rows, Point::new(21.0, 11.0)).unwrap();

        let payload = payload_of(&html);
        assert!((payload["center"]["latitude"].as_f64().unwrap() - 11.0).abs() < f64::EPSILON);
        assert!((payload["center"]["longitude"].as_f64().unwrap() - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn markup_breaking_labels_stay_inside_the_payload() {
        let records = vec![record(10.0, 20.0, "</script><script>alert(1)</script>")];
        let rows: Vec<&IncidentRecord> = records.iter().collect();
        let html = render_map("Mysuru", MapKind::Scatter, &rows, Point::new(20.0, 10.0)).unwrap();

        assert!(!html.contains("</script><script>alert"));
        let payload = payload_of(&html);
        assert_eq!(
            payload["points"][0]["label"],
            "</script><script>alert(1)</script>"
        );
    }

    #[test]
    fn slugs_are_lowercase_and_collapsed() {
        assert_eq!(district_slug("Bengaluru City"), "bengaluru-city");
        assert_eq!(district_slug("  K.G.F.  "), "k-g-f");
        assert_eq!(district_slug("***"), "district");
    }

    #[test]
    fn file_names_combine_slug_and_kind() {
        assert_eq!(
            map_file_name("Bengaluru City", MapKind::Heatmap),
            "bengaluru-city-heatmap.html"
        );
        assert_eq!(
            map_file_name("Mysuru", MapKind::Scatter),
            "mysuru-scatter.html"
        );
    }
}
