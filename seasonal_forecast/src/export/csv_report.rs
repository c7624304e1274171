//! CSV export: one row per predicted variable

use crate::engine::OutlookReport;
use crate::error::{ForecastError, Result};
use crate::export::{export_variables, ConfidenceLevel, ExportContext};
use std::io::Write;

/// Fixed header row
pub const CSV_HEADERS: [&str; 16] = [
    "Variable",
    "Parameter Code",
    "Predicted Value",
    "Unit",
    "Confidence %",
    "Range Min",
    "Range Max",
    "Standard Deviation",
    "Samples Used",
    "Status",
    "Location Lat",
    "Location Lng",
    "Target Date",
    "Report Generated",
    "Data Source",
    "Source URL",
];

/// Write the report as CSV, one row per prediction in catalog order
pub fn write_csv<W: Write>(report: &OutlookReport, ctx: &ExportContext<'_>, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    let target_date = report.target.to_string();
    let timestamp = ctx.timestamp();

    let variables = export_variables(
        &ctx.config.catalog,
        report.predictions.keys().map(String::as_str),
    );

    for variable in &variables {
        let Some(prediction) = report.prediction(&variable.code) else {
            continue;
        };

        wtr.write_record([
            variable.label.clone(),
            variable.code.clone(),
            format!("{:.2}", prediction.value),
            variable.unit.clone(),
            format!("{:.1}", prediction.confidence),
            format!("{:.2}", prediction.range.min),
            format!("{:.2}", prediction.range.max),
            format!("{:.2}", prediction.std_dev),
            prediction.samples.to_string(),
            ConfidenceLevel::from_confidence(prediction.confidence)
                .label()
                .to_string(),
            format!("{:.4}", ctx.location.latitude()),
            format!("{:.4}", ctx.location.longitude()),
            target_date.clone(),
            timestamp.clone(),
            ctx.config.data_source.clone(),
            ctx.config.source_url.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the report as a CSV string
pub fn to_csv_string(report: &OutlookReport, ctx: &ExportContext<'_>) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(report, ctx, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ForecastError::DataError(format!("CSV output is not UTF-8: {}", e)))
}
