//! Error types for the channel_forecast crate

use thiserror::Error;

/// Custom error types for the channel_forecast crate
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A window or series is too short for the requested operation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// An input record is missing a required field or carries an unusable value
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] metric_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while loading fixture data
    #[error("Data load error: {0}")]
    DataLoad(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl From<csv::Error> for AnalyticsError {
    fn from(err: csv::Error) -> Self {
        AnalyticsError::DataLoad(err.to_string())
    }
}
