//! Error types for the fx_forecast crate

use thiserror::Error;

/// Custom error types for the fx_forecast crate
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Error loading or parsing the historical data source
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// Error from out-of-range or non-positive user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error from the forecasting engine
    #[error("Engine error: {0}")]
    Engine(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<polars::prelude::PolarsError> for DashboardError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        DashboardError::DataLoad(err.to_string())
    }
}
