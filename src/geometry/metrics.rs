//! Parcel area, perimeter and centroid
//!
//! Every function treats its input as an implicitly closed ring: the last
//! vertex connects back to the first. Callers must not repeat the first
//! vertex at the end.

use super::DegreeScale;
use crate::domain::{GeoPoint, ParcelMetrics, validate_all};
use crate::error::{ParcelError, Result};

/// Minimum vertex count for a ring that encloses anything
pub const MIN_RING_VERTICES: usize = 3;

fn check_ring(points: &[GeoPoint]) -> Result<()> {
    if points.len() < MIN_RING_VERTICES {
        return Err(ParcelError::InsufficientVertices {
            required: MIN_RING_VERTICES,
            found: points.len(),
        });
    }
    validate_all(points)
}

/// Consecutive vertex pairs including the closing edge (last -> first)
fn edges(points: &[GeoPoint]) -> impl Iterator<Item = (&GeoPoint, &GeoPoint)> {
    points.iter().zip(points.iter().cycle().skip(1))
}

/// Enclosed area in hectares
///
/// Shoelace formula over degrees (lat as x, lon as y), converted with
/// the fixed 111km/degree constant. Winding order does not matter.
///
/// Coordinates are taken relative to the first vertex before multiplying;
/// the area is unchanged and small parcels far from (0, 0) keep their
/// precision.
pub fn compute_area(points: &[GeoPoint]) -> Result<f64> {
    check_ring(points)?;

    let origin = points[0];
    let twice_signed: f64 = edges(points)
        .map(|(a, b)| {
            let (ax, ay) = (a.lat - origin.lat, a.lon - origin.lon);
            let (bx, by) = (b.lat - origin.lat, b.lon - origin.lon);
            ax * by - bx * ay
        })
        .sum();
    let raw = twice_signed.abs() / 2.0;

    Ok(DegreeScale.square_degrees_to_hectares(raw))
}

/// Perimeter in meters, closing edge included
pub fn compute_perimeter(points: &[GeoPoint]) -> Result<f64> {
    check_ring(points)?;

    let scale = DegreeScale;
    Ok(edges(points).map(|(a, b)| scale.distance(a, b)).sum())
}

/// Vertex centroid: the mean of all latitudes and all longitudes
///
/// This is not the area-weighted centroid. On concave parcels it can sit
/// well off-center, but map pins are placed with this value.
pub fn compute_centroid(points: &[GeoPoint]) -> Result<GeoPoint> {
    if points.is_empty() {
        return Err(ParcelError::InsufficientVertices {
            required: 1,
            found: 0,
        });
    }
    validate_all(points)?;

    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));

    Ok(GeoPoint::new(lat_sum / n, lon_sum / n))
}

/// Area, perimeter and centroid in one pass; no partial result on error
pub fn compute_parcel_metrics(points: &[GeoPoint]) -> Result<ParcelMetrics> {
    let area_hectares = compute_area(points)?;
    let perimeter_meters = compute_perimeter(points)?;
    let centroid = compute_centroid(points)?;

    tracing::debug!(
        vertices = points.len(),
        area_hectares,
        perimeter_meters,
        "computed parcel metrics"
    );

    Ok(ParcelMetrics {
        area_hectares,
        perimeter_meters,
        centroid,
    })
}
