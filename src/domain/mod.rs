pub mod parcel;
pub mod point;

pub use parcel::{ParcelMetrics, ParcelRecord};
pub use point::{GeoPoint, validate_all};
