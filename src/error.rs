use thiserror::Error;

/// Errors raised while reading or measuring a parcel ring
#[derive(Debug, Error)]
pub enum ParcelError {
    #[error("need at least {required} vertices, got {found}")]
    InsufficientVertices { required: usize, found: usize },

    #[error("vertex {index} has out-of-range coordinate ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unsupported input: {0}")]
    Unsupported(String),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParcelError>;
