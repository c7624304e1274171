//! JSON export: metadata, per-variable forecasts and optional trends

use crate::catalog::Variable;
use crate::data::Location;
use crate::distribution::DistributionPoint;
use crate::engine::OutlookReport;
use crate::error::Result;
use crate::export::{export_variables, interpretation, ConfidenceLevel, ExportContext};
use crate::models::PredictionRange;
use crate::trend::{trend_slope, TrendPoint};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

const METHODOLOGY: &str = "Seasonal analog forecast: observations from the same calendar month \
within the configured number of days of the target day are combined with harmonic recency \
weights (1, 1/2, 1/3, ... by year, most recent first). Uncertainty is the population standard \
deviation of the matched values around the weighted mean; confidence decreases with the \
coefficient of variation.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub metadata: ReportMetadata,
    pub forecasts: Vec<ForecastEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_trends: Option<BTreeMap<String, TrendEntry>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: String,
    pub target_date: String,
    pub location: Location,
    pub data_source: String,
    pub source_url: String,
    pub methodology: String,
    pub analysis_window: AnalysisWindow,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisWindow {
    pub window_days: u32,
    pub reference_years: u32,
    pub weighting: String,
    pub distribution_samples: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub variable: Variable,
    pub prediction: PredictionSummary,
    pub statistics: Statistics,
    pub interpretation: String,
    pub distribution: Vec<DistributionPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionSummary {
    pub value: f64,
    pub unit: String,
    pub range: PredictionRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub std_dev: f64,
    pub samples: usize,
    pub range_min: f64,
    pub range_max: f64,
    pub confidence: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub label: String,
    pub unit: String,
    pub points: Vec<TrendPoint>,
    pub trend_per_year: Option<f64>,
}

/// Assemble the JSON document for a report
pub fn build_json_report(report: &OutlookReport, ctx: &ExportContext<'_>) -> JsonReport {
    let config = ctx.config;

    let forecasts = export_variables(&config.catalog, report.predictions.keys().map(String::as_str))
        .into_iter()
        .filter_map(|variable| {
            let prediction = report.prediction(&variable.code)?;
            Some(ForecastEntry {
                prediction: PredictionSummary {
                    value: prediction.value,
                    unit: variable.unit.clone(),
                    range: prediction.range,
                },
                statistics: Statistics {
                    std_dev: prediction.std_dev,
                    samples: prediction.samples,
                    range_min: prediction.range.min,
                    range_max: prediction.range.max,
                    confidence: prediction.confidence,
                    status: ConfidenceLevel::from_confidence(prediction.confidence)
                        .label()
                        .to_string(),
                },
                interpretation: interpretation(&variable, prediction),
                distribution: prediction.distribution.clone(),
                variable,
            })
        })
        .collect();

    let trends: BTreeMap<String, TrendEntry> =
        export_variables(&config.catalog, report.trends.keys().map(String::as_str))
            .into_iter()
            .filter_map(|variable| {
                let points = report.trend(&variable.code)?;
                Some((
                    variable.code,
                    TrendEntry {
                        label: variable.label,
                        unit: variable.unit,
                        points: points.to_vec(),
                        trend_per_year: trend_slope(points),
                    },
                ))
            })
            .collect();

    JsonReport {
        metadata: ReportMetadata {
            generated_at: ctx.timestamp(),
            target_date: report.target.to_string(),
            location: ctx.location,
            data_source: config.data_source.clone(),
            source_url: config.source_url.clone(),
            methodology: METHODOLOGY.to_string(),
            analysis_window: AnalysisWindow {
                window_days: config.window_days,
                reference_years: config.reference_years,
                weighting: "harmonic (1/rank, most recent first)".to_string(),
                distribution_samples: config.distribution_samples,
            },
        },
        forecasts,
        historical_trends: (!trends.is_empty()).then_some(trends),
    }
}

/// Write the report as pretty-printed JSON
pub fn write_json<W: Write>(report: &OutlookReport, ctx: &ExportContext<'_>, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &build_json_report(report, ctx))?;
    Ok(())
}

/// Render the report as a pretty-printed JSON string
pub fn to_json_string(report: &OutlookReport, ctx: &ExportContext<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build_json_report(report, ctx))?)
}
