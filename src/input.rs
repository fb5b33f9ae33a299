//! Reading parcel rings from files
//!
//! Three layouts are accepted:
//! - JSON: `[{"lat": .., "lon": ..}, ..]` or `[[lat, lon], ..]`
//! - GeoJSON: Polygon, Feature or FeatureCollection (positions are `[lon, lat]`)
//! - Text: one `lat,lon` per line, `#` starts a comment
//!
//! A trailing vertex equal to the first is dropped so every reader hands
//! back an implicitly closed ring.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::GeoPoint;
use crate::error::{ParcelError, Result};

/// Layout of a ring file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingFormat {
    Json,
    GeoJson,
    Text,
}

impl RingFormat {
    /// Guess the layout from a file extension, defaulting to text
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("geojson") => RingFormat::GeoJson,
            Some("json") => RingFormat::Json,
            _ => RingFormat::Text,
        }
    }
}

impl FromStr for RingFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(RingFormat::Json),
            "geojson" => Ok(RingFormat::GeoJson),
            "text" | "txt" | "csv" => Ok(RingFormat::Text),
            _ => Err(format!(
                "Unknown ring format: {}. Use json, geojson or text",
                s
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonVertex {
    Object { lat: f64, lon: f64 },
    Pair([f64; 2]),
}

impl From<JsonVertex> for GeoPoint {
    fn from(v: JsonVertex) -> Self {
        match v {
            JsonVertex::Object { lat, lon } => GeoPoint::new(lat, lon),
            JsonVertex::Pair([lat, lon]) => GeoPoint::new(lat, lon),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonObject {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    Feature {
        geometry: Option<Box<GeoJsonObject>>,
    },
    FeatureCollection {
        features: Vec<GeoJsonObject>,
    },
    #[serde(other)]
    Other,
}

/// Read a ring from `path`, picking the layout from its extension
pub fn read_ring(path: &Path) -> Result<Vec<GeoPoint>> {
    read_ring_as(path, None)
}

/// Read a ring from `path`; `format` overrides the extension guess
pub fn read_ring_as(path: &Path, format: Option<RingFormat>) -> Result<Vec<GeoPoint>> {
    let contents = std::fs::read_to_string(path)?;
    let format = format.unwrap_or_else(|| RingFormat::from_path(path));

    tracing::debug!(path = %path.display(), ?format, "reading ring");

    parse_ring(&contents, format)
}

/// Parse a ring from in-memory text
pub fn parse_ring(contents: &str, format: RingFormat) -> Result<Vec<GeoPoint>> {
    let mut ring = match format {
        RingFormat::Json => parse_json(contents)?,
        RingFormat::GeoJson => parse_geojson(contents)?,
        RingFormat::Text => parse_text(contents)?,
    };

    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    Ok(ring)
}

fn parse_json(contents: &str) -> Result<Vec<GeoPoint>> {
    let vertices: Vec<JsonVertex> = serde_json::from_str(contents)?;
    Ok(vertices.into_iter().map(GeoPoint::from).collect())
}

fn parse_geojson(contents: &str) -> Result<Vec<GeoPoint>> {
    let object: GeoJsonObject = serde_json::from_str(contents)?;
    exterior_ring(object)
}

fn exterior_ring(object: GeoJsonObject) -> Result<Vec<GeoPoint>> {
    match object {
        GeoJsonObject::Polygon { coordinates } => {
            let exterior = coordinates
                .into_iter()
                .next()
                .ok_or_else(|| ParcelError::Unsupported("polygon has no rings".to_string()))?;

            exterior
                .into_iter()
                .map(|position| match position.as_slice() {
                    [lon, lat, ..] => Ok(GeoPoint::new(*lat, *lon)),
                    _ => Err(ParcelError::Unsupported(
                        "position with fewer than two values".to_string(),
                    )),
                })
                .collect()
        }
        GeoJsonObject::Feature { geometry } => match geometry {
            Some(g) => exterior_ring(*g),
            None => Err(ParcelError::Unsupported("feature has no geometry".to_string())),
        },
        GeoJsonObject::FeatureCollection { features } => match features.into_iter().next() {
            Some(first) => exterior_ring(first),
            None => Err(ParcelError::Unsupported(
                "feature collection is empty".to_string(),
            )),
        },
        GeoJsonObject::Other => Err(ParcelError::Unsupported(
            "only Polygon geometries describe a parcel".to_string(),
        )),
    }
}

fn parse_text(contents: &str) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();

    for (i, raw) in contents.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let parse_err = |message: String| ParcelError::Parse {
            line: i + 1,
            message,
        };

        let (lat, lon) = line
            .split_once(',')
            .ok_or_else(|| parse_err(format!("expected 'lat,lon', got '{}'", line)))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| parse_err(format!("invalid latitude '{}'", lat.trim())))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| parse_err(format!("invalid longitude '{}'", lon.trim())))?;

        points.push(GeoPoint::new(lat, lon));
    }

    Ok(points)
}
