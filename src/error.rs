//! Error types for the climate_outlook crate

use seasonal_forecast::ForecastError;
use thiserror::Error;

/// Errors surfaced by the application shell
#[derive(Debug, Error)]
pub enum OutlookError {
    /// Error from the forecasting engine, loaders or exporters
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Error from the historical data provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, OutlookError>;
