use crate::domain::GeoPoint;

/// Fixed planar conversion from degrees to meters
///
/// Uses the same constant on both axes:
/// - dy = Δlat * 111000
/// - dx = Δlon * 111000
///
/// No cos(lat) correction is applied, so east-west distances are
/// overstated away from the equator. Area and perimeter both go through
/// this type so they always agree on the constant. Good enough for
/// parcels under ~10km across near the equator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeScale;

impl DegreeScale {
    /// Meters per degree on either axis
    pub const METERS_PER_DEGREE: f64 = 111_000.0;

    const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

    /// Convert a coordinate delta in degrees to meters
    pub fn to_meters(&self, delta_deg: f64) -> f64 {
        delta_deg * Self::METERS_PER_DEGREE
    }

    /// Convert a length in meters back to degrees
    pub fn meters_to_degrees(&self, meters: f64) -> f64 {
        meters / Self::METERS_PER_DEGREE
    }

    /// Convert an area in squared degrees to hectares
    pub fn square_degrees_to_hectares(&self, raw: f64) -> f64 {
        raw * Self::METERS_PER_DEGREE * Self::METERS_PER_DEGREE / Self::SQUARE_METERS_PER_HECTARE
    }

    /// Planar distance in meters between two points
    pub fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        let dy = self.to_meters(b.lat - a.lat);
        let dx = self.to_meters(b.lon - a.lon);
        dx.hypot(dy)
    }
}
