use geo::{LineString, Simplify};

use super::{DegreeScale, MIN_RING_VERTICES};
use crate::domain::GeoPoint;

/// Drop vertices that deviate less than `tolerance_m` from the ring outline
///
/// Ramer-Douglas-Peucker over the closed ring. The tolerance is converted
/// to degrees with the same fixed constant used for measuring, so it means
/// the same thing on both axes. The result is never shorter than a valid
/// ring: if simplification would collapse it, the input comes back as is.
///
/// RDP always keeps the seam of the closed line, so the ring is rotated to
/// start at the vertex farthest from the vertex centroid, which is always
/// a hull corner. A simplified ring may therefore start at a different
/// vertex than the input.
pub fn simplify_ring(points: &[GeoPoint], tolerance_m: f64) -> Vec<GeoPoint> {
    if tolerance_m <= 0.0 || points.len() <= MIN_RING_VERTICES {
        return points.to_vec();
    }

    let epsilon = DegreeScale.meters_to_degrees(tolerance_m);
    let seam = farthest_from_centroid(points);

    let line: LineString<f64> = points[seam..]
        .iter()
        .chain(&points[..seam])
        .chain(points.get(seam))
        .map(|p| geo::coord! { x: p.lon, y: p.lat })
        .collect();

    let simplified = line.simplify(&epsilon);

    let mut ring: Vec<GeoPoint> = simplified
        .0
        .into_iter()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect();
    // closing vertex duplicates the first
    ring.pop();

    if ring.len() < MIN_RING_VERTICES {
        return points.to_vec();
    }

    tracing::debug!(
        before = points.len(),
        after = ring.len(),
        tolerance_m,
        "simplified ring"
    );

    ring
}

fn farthest_from_centroid(points: &[GeoPoint]) -> usize {
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.lon).sum::<f64>() / n;
    let center = GeoPoint::new(lat, lon);

    points
        .iter()
        .map(|p| DegreeScale.distance(p, &center))
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
