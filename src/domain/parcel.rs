use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::error::Result;
use crate::geometry::compute_parcel_metrics;

/// Derived measurements of a parcel ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelMetrics {
    pub area_hectares: f64,
    pub perimeter_meters: f64,
    pub centroid: GeoPoint,
}

/// A named parcel ready to hand to whatever store persists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    pub name: String,
    pub coordinates: Vec<GeoPoint>,
    pub area_hectares: f64,
    pub perimeter_meters: f64,
    pub centroid: GeoPoint,
    pub created_at: DateTime<Utc>,
}

impl ParcelRecord {
    /// Measure `coordinates` and stamp the record with the current time
    ///
    /// Fails without building anything if the ring cannot be measured.
    pub fn new(name: impl Into<String>, coordinates: Vec<GeoPoint>) -> Result<Self> {
        Self::with_timestamp(name, coordinates, Utc::now())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        coordinates: Vec<GeoPoint>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let metrics = compute_parcel_metrics(&coordinates)?;

        Ok(Self {
            name: name.into(),
            coordinates,
            area_hectares: metrics.area_hectares,
            perimeter_meters: metrics.perimeter_meters,
            centroid: metrics.centroid,
            created_at,
        })
    }

    pub fn metrics(&self) -> ParcelMetrics {
        ParcelMetrics {
            area_hectares: self.area_hectares,
            perimeter_meters: self.perimeter_meters,
            centroid: self.centroid,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParcelError;
    use chrono::TimeZone;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.01, 0.01),
            GeoPoint::new(0.01, 0.0),
        ]
    }

    #[test]
    fn test_record_carries_metrics() {
        let record = ParcelRecord::new("Talhão 1", square()).unwrap();

        assert_eq!(record.name, "Talhão 1");
        assert_eq!(record.coordinates.len(), 4);
        assert!((record.area_hectares - 123.21).abs() < 1e-6);
        assert!((record.perimeter_meters - 4440.0).abs() < 1e-6);
        assert_eq!(record.metrics().centroid, record.centroid);
    }

    #[test]
    fn test_record_refuses_bad_ring() {
        let err = ParcelRecord::new("bad", square()[..2].to_vec()).unwrap_err();
        assert!(matches!(err, ParcelError::InsufficientVertices { .. }));
    }

    #[test]
    fn test_record_json_shape() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let record = ParcelRecord::with_timestamp("north field", square(), ts).unwrap();

        let json = record.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "north field");
        assert!(value["areaHectares"].is_number());
        assert!(value["perimeterMeters"].is_number());
        assert_eq!(value["coordinates"][1]["lon"], 0.01);
        assert_eq!(value["createdAt"], "2024-03-01T12:00:00Z");

        let back: ParcelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
