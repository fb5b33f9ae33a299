//! parcelmetrics - Area, perimeter and centroid of farm parcels from lat/lon rings

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod input;
pub mod report;
pub mod track;

pub use domain::{GeoPoint, ParcelMetrics, ParcelRecord};
pub use error::{ParcelError, Result};
pub use geometry::{compute_area, compute_centroid, compute_parcel_metrics, compute_perimeter};
