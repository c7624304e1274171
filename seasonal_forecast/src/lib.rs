//! # Seasonal Forecast
//!
//! A statistical climate-outlook engine. Given several years of daily
//! observations for a location, it forecasts a calendar date from the
//! matching seasonal window of prior years.
//!
//! ## Features
//!
//! - Seasonal window extraction (same month, ±7 days of the target day)
//! - Harmonic recency-weighted point prediction with spread and confidence
//! - Gaussian curve synthesis for distribution charts
//! - Same-month yearly trend series with least-squares slope
//! - NASA POWER JSON and wide CSV payload loading
//! - CSV and JSON report export
//!
//! ## Quick Start
//!
//! ```rust
//! use seasonal_forecast::{HistoricalSeries, SeasonalForecaster, TargetDate};
//!
//! let mut series = HistoricalSeries::new();
//! for year in 2021..=2025 {
//!     for day in 1..=31 {
//!         series.insert("T2M", format!("{}07{:02}", year, day), 24.0 + (year - 2021) as f64);
//!     }
//! }
//!
//! let target = TargetDate::from_ymd(2026, 7, 15)?;
//! let report = SeasonalForecaster::default().forecast(&series, &target)?;
//!
//! let temperature = report.prediction("T2M").unwrap();
//! assert_eq!(temperature.samples, 75);
//! assert!(temperature.value > 26.0);
//! assert_eq!(report.trend("T2M").unwrap().len(), 5);
//! # Ok::<(), seasonal_forecast::ForecastError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod data;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod trend;
pub mod utils;
pub mod window;

// Re-export commonly used types
pub use crate::catalog::{Variable, VariableCatalog};
pub use crate::config::OutlookConfig;
pub use crate::data::{DataLoader, HistoricalSeries, Location, TargetDate, VariableSeries};
pub use crate::distribution::{DistributionPoint, DistributionSynthesizer};
pub use crate::engine::{OutlookReport, SeasonalForecaster};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{HarmonicWeightedPredictor, Prediction, PredictionRange, SeasonalPredictor};
pub use crate::trend::{aggregate_trend, trend_slope, TrendPoint};
pub use crate::utils::ReferencePeriod;
pub use crate::window::{SeasonalWindow, WindowedObservation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
