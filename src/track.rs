//! Recording a parcel outline from a stream of GPS fixes
//!
//! A drone (or a simulated one) flies the parcel boundary and reports
//! fixes one at a time. Nothing is measured until recording stops.

use std::f64::consts::TAU;

use crate::domain::{GeoPoint, ParcelRecord};
use crate::error::Result;
use crate::geometry::{DegreeScale, simplify_ring};

/// Accumulates a ring of fixes for a single parcel
#[derive(Debug, Clone)]
pub struct RingRecorder {
    name: String,
    points: Vec<GeoPoint>,
    simplify_tolerance_m: f64,
}

impl RingRecorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
            simplify_tolerance_m: 0.0,
        }
    }

    /// Simplify the ring with this tolerance (meters) when recording stops
    pub fn with_simplify(mut self, tolerance_m: f64) -> Self {
        self.simplify_tolerance_m = tolerance_m;
        self
    }

    /// Append a fix to the ring
    ///
    /// Returns `Ok(false)` when the fix repeats the previous one and was
    /// skipped. Out-of-range fixes are rejected and not stored.
    pub fn record(&mut self, point: GeoPoint) -> Result<bool> {
        point.validate(self.points.len())?;

        if self.points.last() == Some(&point) {
            tracing::trace!(lat = point.lat, lon = point.lon, "skipping repeated fix");
            return Ok(false);
        }

        self.points.push(point);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Stop recording and measure the ring
    ///
    /// A final fix landing back on the first one is dropped, since rings
    /// are closed implicitly.
    pub fn finish(mut self) -> Result<ParcelRecord> {
        if self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }

        tracing::debug!(name = %self.name, fixes = self.points.len(), "recording stopped");

        let ring = simplify_ring(&self.points, self.simplify_tolerance_m);
        ParcelRecord::new(self.name, ring)
    }
}

/// Deterministic circular flight path around `center`
///
/// Produces `fixes` evenly spaced points at `radius_m` using the same fixed
/// meters-per-degree constant as the metrics, so the recorded ring is a
/// regular polygon in measurement space.
pub fn simulate_orbit(center: GeoPoint, radius_m: f64, fixes: usize) -> Vec<GeoPoint> {
    let radius_deg = DegreeScale.meters_to_degrees(radius_m);

    (0..fixes)
        .map(|i| {
            let theta = TAU * i as f64 / fixes as f64;
            GeoPoint::new(
                center.lat + radius_deg * theta.sin(),
                center.lon + radius_deg * theta.cos(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParcelError;

    #[test]
    fn test_record_skips_repeats() {
        let mut rec = RingRecorder::new("field");
        assert!(rec.record(GeoPoint::new(1.0, 1.0)).unwrap());
        assert!(!rec.record(GeoPoint::new(1.0, 1.0)).unwrap());
        assert!(rec.record(GeoPoint::new(1.0, 1.001)).unwrap());
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn test_record_rejects_invalid_fix() {
        let mut rec = RingRecorder::new("field");
        let err = rec.record(GeoPoint::new(0.0, 181.0)).unwrap_err();
        assert!(matches!(err, ParcelError::InvalidCoordinate { .. }));
        assert!(rec.is_empty());
    }

    #[test]
    fn test_finish_drops_closing_fix() {
        let mut rec = RingRecorder::new("closed");
        for p in [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.01, 0.01),
            GeoPoint::new(0.01, 0.0),
            GeoPoint::new(0.0, 0.0),
        ] {
            rec.record(p).unwrap();
        }

        let record = rec.finish().unwrap();
        assert_eq!(record.coordinates.len(), 4);
        assert!((record.perimeter_meters - 4440.0).abs() < 1e-6);
    }

    #[test]
    fn test_finish_with_too_few_fixes() {
        let mut rec = RingRecorder::new("short");
        rec.record(GeoPoint::new(0.0, 0.0)).unwrap();
        rec.record(GeoPoint::new(0.0, 0.01)).unwrap();

        assert!(matches!(
            rec.finish(),
            Err(ParcelError::InsufficientVertices { found: 2, .. })
        ));
    }

    #[test]
    fn test_finish_applies_simplify() {
        let mut rec = RingRecorder::new("jittery").with_simplify(5.0);
        let wobble = 1.0 / 111_000.0;
        for p in [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(wobble, 0.005),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.01, 0.01),
            GeoPoint::new(0.01, 0.0),
        ] {
            rec.record(p).unwrap();
        }

        let record = rec.finish().unwrap();
        assert_eq!(record.coordinates.len(), 4);
        assert!((record.area_hectares - 123.21).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_is_regular_polygon() {
        let center = GeoPoint::new(-15.775, -47.925);
        let radius = 500.0;
        let n = 36;

        let mut rec = RingRecorder::new("orbit");
        for p in simulate_orbit(center, radius, n) {
            rec.record(p).unwrap();
        }
        let record = rec.finish().unwrap();

        let n_f = n as f64;
        let expected_area_m2 = 0.5 * n_f * radius * radius * (TAU / n_f).sin();
        let expected_perimeter = 2.0 * n_f * radius * (std::f64::consts::PI / n_f).sin();

        assert!((record.area_hectares - expected_area_m2 / 10_000.0).abs() < 1e-3);
        assert!((record.perimeter_meters - expected_perimeter).abs() < 1e-3);
        assert!((record.centroid.lat - center.lat).abs() < 1e-9);
        assert!((record.centroid.lon - center.lon).abs() < 1e-9);
    }
}
