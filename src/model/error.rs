//! Validation errors for orders and their wire records.

use thiserror::Error;

/// Errors raised when an order or an order record is malformed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The record has no identity.
    #[error("Order id is empty")]
    EmptyId,

    /// Package weight must be a positive, finite number of kilograms.
    #[error("Invalid package weight: {0} kg")]
    InvalidWeight(f64),

    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    #[error("Invalid coordinate: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Progress must lie in [0, 1].
    #[error("Invalid progress: {0}")]
    InvalidProgress(f64),

    /// A timestamp field could not be parsed as ISO-8601.
    #[error("Invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}
