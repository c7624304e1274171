//! Historical observation data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Date format used by the historical data provider
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Date format used for target dates and reports
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily observations of one variable keyed by `YYYYMMDD`.
///
/// A non-finite value marks a missing observation.
pub type VariableSeries = BTreeMap<String, f64>;

/// Multi-year daily observations for several variables
#[derive(Debug, Clone, Default)]
pub struct HistoricalSeries {
    /// Observations keyed by parameter code
    parameters: BTreeMap<String, VariableSeries>,
}

impl HistoricalSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a series from per-parameter observation maps
    pub fn from_parameters(parameters: BTreeMap<String, VariableSeries>) -> Self {
        Self { parameters }
    }

    /// Add a parameter's observations, replacing any existing ones
    pub fn with_parameter(mut self, code: impl Into<String>, values: VariableSeries) -> Self {
        self.parameters.insert(code.into(), values);
        self
    }

    /// Record a single observation
    pub fn insert(&mut self, code: &str, date: impl Into<String>, value: f64) {
        self.parameters
            .entry(code.to_string())
            .or_default()
            .insert(date.into(), value);
    }

    /// Get the observations for a parameter code
    pub fn parameter(&self, code: &str) -> Option<&VariableSeries> {
        self.parameters.get(code)
    }

    /// Parameter codes present in the series
    pub fn parameter_codes(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Check if the series holds no parameters
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Number of parameters in the series
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Total number of raw entries across all parameters, valid or not
    pub fn observation_count(&self) -> usize {
        self.parameters.values().map(BTreeMap::len).sum()
    }
}

/// Parse a provider date string (`YYYYMMDD`) into a calendar date.
///
/// Anything other than eight ASCII digits forming a real date is rejected.
pub fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Iterate the usable observations of a variable: parseable date, finite value
pub fn valid_observations(series: &VariableSeries) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
    series.iter().filter_map(|(raw, &value)| {
        if !value.is_finite() {
            return None;
        }
        parse_observation_date(raw).map(|date| (date, value))
    })
}

/// Calendar date a forecast is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDate(NaiveDate);

impl TargetDate {
    /// Wrap a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a target date from its components
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "{:04}-{:02}-{:02} is not a valid calendar date",
                    year, month, day
                ))
            })
    }

    /// Parse an ISO `YYYY-MM-DD` date
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self(NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)?))
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of year (1-12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month (1-31)
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl FromStr for TargetDate {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Geographic point a forecast is computed for
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a validated location
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ForecastError::InvalidParameter(format!(
                "Latitude must be between -90 and 90, got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ForecastError::InvalidParameter(format!(
                "Longitude must be between -180 and 180, got {}",
                longitude
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Loader for historical data provider payloads
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Parse a NASA POWER daily point payload.
    ///
    /// Values equal to the fill value (taken from the payload header when
    /// present, `fill_value` otherwise) and nulls become NaN.
    pub fn from_power_json(payload: &str, fill_value: f64) -> Result<HistoricalSeries> {
        let root: serde_json::Value = serde_json::from_str(payload)?;

        let fill_value = root
            .pointer("/header/fill_value")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(fill_value);

        let parameters = root
            .pointer("/properties/parameter")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| {
                ForecastError::DataError(
                    "Payload has no properties.parameter object".to_string(),
                )
            })?;

        let mut series = HistoricalSeries::new();
        let mut missing = 0usize;

        for (code, values) in parameters {
            let values = values.as_object().ok_or_else(|| {
                ForecastError::DataError(format!("Parameter '{}' is not a date map", code))
            })?;

            let mut observations = VariableSeries::new();
            for (date, value) in values {
                let value = value
                    .as_f64()
                    .filter(|v| *v != fill_value)
                    .unwrap_or_else(|| {
                        missing += 1;
                        f64::NAN
                    });
                observations.insert(date.clone(), value);
            }
            series = series.with_parameter(code.clone(), observations);
        }

        if missing > 0 {
            debug!(missing, fill_value, "Marked fill values as missing");
        }

        Ok(series)
    }

    /// Read a NASA POWER daily point payload from a file
    pub fn from_power_json_file<P: AsRef<Path>>(
        path: P,
        fill_value: f64,
    ) -> Result<HistoricalSeries> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_power_json(&payload, fill_value)
    }

    /// Load a wide CSV file: a `date` column followed by one column per parameter code
    pub fn from_csv<P: AsRef<Path>>(path: P, fill_value: f64) -> Result<HistoricalSeries> {
        let file = File::open(path)?;
        Self::from_csv_reader(file, fill_value)
    }

    /// Load a wide CSV from any reader
    pub fn from_csv_reader<R: Read>(reader: R, fill_value: f64) -> Result<HistoricalSeries> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("date"))
            .ok_or_else(|| ForecastError::DataError("No date column found in data".to_string()))?;

        let columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != date_idx)
            .map(|(idx, name)| (idx, name.to_string()))
            .collect();

        if columns.is_empty() {
            return Err(ForecastError::DataError(
                "No parameter columns found in data".to_string(),
            ));
        }

        let mut series = columns.iter().fold(HistoricalSeries::new(), |acc, (_, code)| {
            acc.with_parameter(code.clone(), VariableSeries::new())
        });

        let mut unparsable = 0usize;
        for record in rdr.records() {
            let record = record?;
            let date = record.get(date_idx).unwrap_or_default();

            for (idx, code) in &columns {
                let cell = record.get(*idx).unwrap_or_default();
                let value = match cell.parse::<f64>() {
                    Ok(v) if v != fill_value => v,
                    Ok(_) => f64::NAN,
                    Err(_) => {
                        if !cell.is_empty() {
                            unparsable += 1;
                        }
                        f64::NAN
                    }
                };
                series.insert(code, date, value);
            }
        }

        if unparsable > 0 {
            warn!(unparsable, "Treated unparsable CSV cells as missing");
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_observation_date() {
        assert_eq!(
            parse_observation_date("20230315"),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(parse_observation_date("20230230"), None);
        assert_eq!(parse_observation_date("2023-03-15"), None);
        assert_eq!(parse_observation_date("202303150"), None);
        assert_eq!(parse_observation_date("2023031"), None);
        assert_eq!(parse_observation_date("abcdefgh"), None);
    }

    #[test]
    fn test_valid_observations_filters_missing() {
        let mut series = VariableSeries::new();
        series.insert("20230301".to_string(), 1.0);
        series.insert("20230302".to_string(), f64::NAN);
        series.insert("20230303".to_string(), f64::INFINITY);
        series.insert("20231301".to_string(), 2.0);

        let valid: Vec<_> = valid_observations(&series).collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].1, 1.0);
    }

    #[test]
    fn test_target_date() {
        let target = TargetDate::parse("2026-07-15").unwrap();
        assert_eq!(target.year(), 2026);
        assert_eq!(target.month(), 7);
        assert_eq!(target.day(), 15);
        assert_eq!(target.to_string(), "2026-07-15");

        assert!(TargetDate::from_ymd(2026, 2, 30).is_err());
        assert!("not-a-date".parse::<TargetDate>().is_err());
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location::new(40.7, -74.0).is_ok());
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -180.5).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_power_json() {
        let payload = r#"{
            "header": {"fill_value": -999.0},
            "properties": {"parameter": {
                "T2M": {"20230101": 3.5, "20230102": -999.0, "20230103": null},
                "PS": {"20230101": 101.2}
            }}
        }"#;

        let series = DataLoader::from_power_json(payload, -999.0).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observation_count(), 4);

        let t2m = series.parameter("T2M").unwrap();
        assert_eq!(t2m["20230101"], 3.5);
        assert!(t2m["20230102"].is_nan());
        assert!(t2m["20230103"].is_nan());
    }

    #[test]
    fn test_from_power_json_rejects_other_shapes() {
        let result = DataLoader::from_power_json(r#"{"properties": {}}"#, -999.0);
        assert!(matches!(result, Err(ForecastError::DataError(_))));

        let result = DataLoader::from_power_json("not json", -999.0);
        assert!(matches!(result, Err(ForecastError::JsonError(_))));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "date,T2M,RH2M\n20230101,4.0,80\n20230102,,-999\n20230103,oops,75\n";
        let series = DataLoader::from_csv_reader(csv.as_bytes(), -999.0).unwrap();

        let t2m = series.parameter("T2M").unwrap();
        assert_eq!(t2m.len(), 3);
        assert_eq!(t2m["20230101"], 4.0);
        assert!(t2m["20230102"].is_nan());
        assert!(t2m["20230103"].is_nan());

        let rh = series.parameter("RH2M").unwrap();
        assert!(rh["20230102"].is_nan());
        assert_eq!(rh["20230103"], 75.0);
    }

    #[test]
    fn test_from_csv_reader_requires_date_column() {
        let result = DataLoader::from_csv_reader("day,T2M\n1,2\n".as_bytes(), -999.0);
        assert!(matches!(result, Err(ForecastError::DataError(_))));

        let result = DataLoader::from_csv_reader("date\n20230101\n".as_bytes(), -999.0);
        assert!(matches!(result, Err(ForecastError::DataError(_))));
    }
}
