use serde::{Deserialize, Serialize};

use crate::error::{ParcelError, Result};

/// A WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check the point lies within [-90, 90] x [-180, 180]
    ///
    /// `index` is the vertex position reported back in the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);

        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(ParcelError::InvalidCoordinate {
                index,
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Validate every vertex of a ring, failing on the first bad one
pub fn validate_all(points: &[GeoPoint]) -> Result<()> {
    points
        .iter()
        .enumerate()
        .try_for_each(|(i, p)| p.validate(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).validate(0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).validate(0).is_ok());
        assert!(GeoPoint::new(-15.78, -47.93).validate(0).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = GeoPoint::new(91.0, 0.0).validate(4).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidCoordinate { index: 4, .. }));

        assert!(GeoPoint::new(0.0, -180.5).validate(0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate(0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).validate(0).is_err());
    }

    #[test]
    fn test_validate_all_reports_first_bad_index() {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 200.0),
            GeoPoint::new(100.0, 0.0),
        ];
        match validate_all(&ring) {
            Err(ParcelError::InvalidCoordinate { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
