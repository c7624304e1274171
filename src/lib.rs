//! # Climate Outlook
//!
//! `climate_outlook` wires the seasonal forecasting engine to a historical
//! data provider. It adds a request session that keeps only the latest
//! request's results.
//!
//! ## Example
//!
//! ```
//! use climate_outlook::{InMemoryProvider, OutlookSession};
//! use seasonal_forecast::{HistoricalSeries, Location, OutlookConfig, TargetDate};
//!
//! let mut series = HistoricalSeries::new();
//! for year in 2021..=2025 {
//!     for day in 1..=30 {
//!         series.insert("RH2M", format!("{}04{:02}", year, day), 65.0);
//!     }
//! }
//!
//! let session = OutlookSession::new(InMemoryProvider::new(series), OutlookConfig::default())?;
//! let location = Location::new(51.5, -0.12)?;
//! let target = TargetDate::from_ymd(2026, 4, 20)?;
//!
//! let report = session.run(location, target, 2026)?.expect("no newer request");
//! assert_eq!(report.prediction("RH2M").unwrap().value, 65.0);
//! # Ok::<(), climate_outlook::OutlookError>(())
//! ```

pub mod error;
pub mod provider;
pub mod session;

pub use climate_math;
pub use seasonal_forecast;

pub use crate::error::{OutlookError, Result};
pub use crate::provider::{
    DataRequest, FileProvider, HistoricalDataProvider, InMemoryProvider, PayloadFormat,
};
pub use crate::session::{Debouncer, OutlookSession, RequestTicket};
