//! Report exporters
//!
//! Exporters only format what the engine produced; they never recompute
//! statistics.

use crate::catalog::{Variable, VariableCatalog};
use crate::config::OutlookConfig;
use crate::data::Location;
use crate::models::Prediction;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub mod csv_report;
pub mod json_report;

pub use csv_report::{to_csv_string, write_csv, CSV_HEADERS};
pub use json_report::{build_json_report, to_json_string, write_json, JsonReport};

/// Request details stamped onto every report
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    pub location: Location,
    pub generated_at: DateTime<Utc>,
    pub config: &'a OutlookConfig,
}

impl<'a> ExportContext<'a> {
    pub fn new(location: Location, generated_at: DateTime<Utc>, config: &'a OutlookConfig) -> Self {
        Self {
            location,
            generated_at,
            config,
        }
    }

    /// Generation timestamp as RFC 3339
    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Qualitative bucket of a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            ConfidenceLevel::High
        } else if confidence >= 40.0 {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Status badge text
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High Confidence",
            ConfidenceLevel::Moderate => "Moderate Confidence",
            ConfidenceLevel::Low => "Low Confidence",
        }
    }
}

/// Variables for the given report codes, catalog order first.
///
/// Codes the catalog does not describe follow in code order, labelled by
/// their code with no unit.
pub fn export_variables<'r>(
    catalog: &VariableCatalog,
    codes: impl IntoIterator<Item = &'r str>,
) -> Vec<Variable> {
    let codes: Vec<&str> = codes.into_iter().collect();

    let known = catalog
        .iter()
        .filter(|variable| codes.contains(&variable.code.as_str()))
        .cloned();
    let unknown = codes
        .iter()
        .filter(|code| catalog.get(code).is_none())
        .map(|code| Variable::new(*code, *code, *code, ""));

    known.chain(unknown).collect()
}

/// Plain-language reading of a prediction
pub fn interpretation(variable: &Variable, prediction: &Prediction) -> String {
    let level = ConfidenceLevel::from_confidence(prediction.confidence);
    format!(
        "Expected {} of {:.2} {} (typically between {:.2} and {:.2} {}). {} ({:.0}%) based on {} historical observations.",
        variable.label.to_lowercase(),
        prediction.value,
        variable.unit,
        prediction.range.min,
        prediction.range.max,
        variable.unit,
        level.label(),
        prediction.confidence,
        prediction.samples
    )
}
