pub mod metrics;
pub mod projection;
pub mod simplify;

pub use metrics::{
    MIN_RING_VERTICES, compute_area, compute_centroid, compute_parcel_metrics, compute_perimeter,
};
pub use projection::DegreeScale;
pub use simplify::simplify_ring;
