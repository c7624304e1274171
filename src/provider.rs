//! Historical data provider seam
//!
//! The engine never fetches anything itself. A provider turns a
//! [`DataRequest`] into a [`HistoricalSeries`]; this module ships a
//! file-backed provider for saved payloads and an in-memory one.

use crate::error::{OutlookError, Result};
use seasonal_forecast::{
    DataLoader, HistoricalSeries, Location, ReferencePeriod, VariableCatalog, VariableSeries,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// NASA POWER daily point endpoint
pub const POWER_DAILY_POINT_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// What to fetch for a forecast request
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub location: Location,
    pub period: ReferencePeriod,
    pub parameters: Vec<String>,
}

impl DataRequest {
    /// Request every catalog variable over the reference period
    pub fn new(location: Location, period: ReferencePeriod, catalog: &VariableCatalog) -> Self {
        Self {
            location,
            period,
            parameters: catalog.codes().into_iter().map(String::from).collect(),
        }
    }

    pub fn start_date(&self) -> String {
        self.period.start_date()
    }

    pub fn end_date(&self) -> String {
        self.period.end_date()
    }

    /// Query URL for a NASA POWER style daily point endpoint
    pub fn power_url(&self, base: &str) -> String {
        format!(
            "{}?parameters={}&community=AG&longitude={}&latitude={}&start={}&end={}&format=JSON",
            base.trim_end_matches('/'),
            self.parameters.join(","),
            self.location.longitude(),
            self.location.latitude(),
            self.start_date(),
            self.end_date()
        )
    }

    /// Keep only the requested parameters and dates inside the period
    pub fn restrict(&self, series: &HistoricalSeries) -> HistoricalSeries {
        let start = self.start_date();
        let end = self.end_date();

        self.parameters
            .iter()
            .filter_map(|code| series.parameter(code).map(|values| (code, values)))
            .fold(HistoricalSeries::new(), |acc, (code, values)| {
                let kept: VariableSeries = values
                    .iter()
                    .filter(|(date, _)| date.as_str() >= start.as_str() && date.as_str() <= end.as_str())
                    .map(|(date, value)| (date.clone(), *value))
                    .collect();
                acc.with_parameter(code.clone(), kept)
            })
    }
}

/// Source of historical daily observations
pub trait HistoricalDataProvider {
    fn fetch(&self, request: &DataRequest) -> Result<HistoricalSeries>;
}

/// Saved provider payload layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// NASA POWER daily point JSON
    PowerJson,
    /// Wide CSV with a `date` column
    Csv,
}

impl PayloadFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(PayloadFormat::PowerJson),
            Some("csv") => Ok(PayloadFormat::Csv),
            _ => Err(OutlookError::Provider(format!(
                "Cannot infer payload format of '{}'; expected .json or .csv",
                path.display()
            ))),
        }
    }
}

/// Serves a payload previously saved to disk
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    format: PayloadFormat,
    fill_value: f64,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>, format: PayloadFormat, fill_value: f64) -> Self {
        Self {
            path: path.into(),
            format,
            fill_value,
        }
    }

    /// Provider with the format taken from the file extension
    pub fn from_path(path: impl Into<PathBuf>, fill_value: f64) -> Result<Self> {
        let path = path.into();
        let format = PayloadFormat::from_path(&path)?;
        Ok(Self::new(path, format, fill_value))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoricalDataProvider for FileProvider {
    fn fetch(&self, request: &DataRequest) -> Result<HistoricalSeries> {
        let series = match self.format {
            PayloadFormat::PowerJson => DataLoader::from_power_json_file(&self.path, self.fill_value)?,
            PayloadFormat::Csv => DataLoader::from_csv(&self.path, self.fill_value)?,
        };

        debug!(
            path = %self.path.display(),
            parameters = series.len(),
            observations = series.observation_count(),
            "Loaded saved payload"
        );

        Ok(request.restrict(&series))
    }
}

/// Serves a series built in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HistoricalSeries,
}

impl InMemoryProvider {
    pub fn new(series: HistoricalSeries) -> Self {
        Self { series }
    }
}

impl HistoricalDataProvider for InMemoryProvider {
    fn fetch(&self, request: &DataRequest) -> Result<HistoricalSeries> {
        Ok(request.restrict(&self.series))
    }
}
