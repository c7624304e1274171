use chrono::{TimeZone, Utc};
use seasonal_forecast::export::{to_csv_string, to_json_string, ExportContext};
use seasonal_forecast::utils::{provider_date, ReferencePeriod};
use seasonal_forecast::{
    DataLoader, ForecastError, Location, OutlookConfig, SeasonalForecaster, TargetDate,
};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a wide daily CSV covering the reference period
fn create_sample_data(period: &ReferencePeriod) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,PRECTOTCORR,T2M,WS2M").unwrap();

    let start = chrono::NaiveDate::from_ymd_opt(period.start_year, 1, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(period.end_year, 12, 31).unwrap();
    for (i, date) in start.iter_days().take_while(|d| *d <= end).enumerate() {
        let precipitation = if i % 3 == 0 { "-999" } else { "1.2" };
        let temperature = 10.0 + (i % 20) as f64 * 0.5;
        writeln!(
            file,
            "{},{},{:.1},",
            provider_date(date),
            precipitation,
            temperature
        )
        .unwrap();
    }

    file
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Configure from a JSON file
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, r#"{{"window_days": 7, "distribution_samples": 40}}"#).unwrap();
    let config = OutlookConfig::from_file(config_file.path()).unwrap();

    // 2. Reference period and data
    let period = ReferencePeriod::preceding(2026, config.reference_years).unwrap();
    let data_file = create_sample_data(&period);
    let series = DataLoader::from_csv(data_file.path(), config.fill_value).unwrap();
    assert_eq!(series.len(), 3);

    // 3. Forecast
    let forecaster = SeasonalForecaster::from_config(&config).unwrap();
    let target = TargetDate::parse("2026-09-10").unwrap();
    let report = forecaster.forecast(&series, &target).unwrap();

    // Wind speed column is empty throughout
    assert!(report.prediction("WS2M").is_none());
    assert!(report.trend("WS2M").is_none());

    let precipitation = report.prediction("PRECTOTCORR").unwrap();
    assert!((precipitation.value - 1.2).abs() < 1e-12);
    assert_eq!(precipitation.confidence, 100.0);
    assert!(precipitation.samples < 75);

    let temperature = report.prediction("T2M").unwrap();
    assert_eq!(temperature.samples, 75);
    assert_eq!(temperature.distribution.len(), 40);
    assert_eq!(report.trend("T2M").unwrap().len(), 5);

    // 4. Export
    let ctx = ExportContext::new(
        Location::new(-33.87, 151.21).unwrap(),
        Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap(),
        &config,
    );
    let csv = to_csv_string(&report, &ctx).unwrap();
    assert_eq!(csv.lines().count(), 3);

    let json = to_json_string(&report, &ctx).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["forecasts"].as_array().unwrap().len(), 2);

    // 5. Test error handling
    let result = DataLoader::from_csv("/nonexistent/path.csv", config.fill_value);
    assert!(matches!(result.unwrap_err(), ForecastError::IoError(_)));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = OutlookConfig {
        distribution_samples: 0,
        ..OutlookConfig::default()
    };
    assert!(SeasonalForecaster::from_config(&config).is_err());
}
