//! Engine configuration

use crate::catalog::VariableCatalog;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters of the seasonal outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlookConfig {
    /// Half-width of the seasonal window in days of month
    pub window_days: u32,
    /// Number of points in the synthesized distribution curve
    pub distribution_samples: usize,
    /// Completed calendar years fetched before the current year
    pub reference_years: u32,
    /// Provider sentinel for missing observations
    pub fill_value: f64,
    /// Data source description for reports
    pub data_source: String,
    /// Data source URL for reports
    pub source_url: String,
    /// Variables to forecast
    pub catalog: VariableCatalog,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            distribution_samples: 50,
            reference_years: 5,
            fill_value: -999.0,
            data_source: "NASA POWER API".to_string(),
            source_url: "https://power.larc.nasa.gov/".to_string(),
            catalog: VariableCatalog::default(),
        }
    }
}

impl OutlookConfig {
    /// Parse a JSON configuration; omitted fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Defaults overridden by `OUTLOOK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OUTLOOK_WINDOW_DAYS") {
            self.window_days = parse_override("OUTLOOK_WINDOW_DAYS", &v)?;
        }
        if let Some(v) = lookup("OUTLOOK_DISTRIBUTION_SAMPLES") {
            self.distribution_samples = parse_override("OUTLOOK_DISTRIBUTION_SAMPLES", &v)?;
        }
        if let Some(v) = lookup("OUTLOOK_REFERENCE_YEARS") {
            self.reference_years = parse_override("OUTLOOK_REFERENCE_YEARS", &v)?;
        }
        if let Some(v) = lookup("OUTLOOK_FILL_VALUE") {
            self.fill_value = parse_override("OUTLOOK_FILL_VALUE", &v)?;
        }
        if let Some(v) = lookup("OUTLOOK_DATA_SOURCE") {
            self.data_source = v;
        }
        if let Some(v) = lookup("OUTLOOK_SOURCE_URL") {
            self.source_url = v;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check parameters are usable
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(ForecastError::ValidationError(
                "window_days must be greater than zero".to_string(),
            ));
        }
        if self.distribution_samples == 0 {
            return Err(ForecastError::ValidationError(
                "distribution_samples must be greater than zero".to_string(),
            ));
        }
        if self.reference_years == 0 {
            return Err(ForecastError::ValidationError(
                "reference_years must be greater than zero".to_string(),
            ));
        }
        self.catalog.validate()
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        ForecastError::InvalidParameter(format!("{} has an invalid value: '{}'", key, raw))
    })
}
