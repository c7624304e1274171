//! Same-month historical trend aggregation

use crate::data::{valid_observations, TargetDate, VariableSeries};
use chrono::Datelike;
use climate_math::LinearFit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean of one year's target-month observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// Average every valid observation in the target month, per year.
///
/// Unlike the seasonal window, every day of the month counts. Years without
/// any usable observation are left out. Output is ascending by year.
pub fn aggregate_trend(series: &VariableSeries, target: &TargetDate) -> Vec<TrendPoint> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for (date, value) in valid_observations(series) {
        if date.month() != target.month() {
            continue;
        }
        let entry = by_year.entry(date.year()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    by_year
        .into_iter()
        .map(|(year, (sum, count))| TrendPoint {
            year,
            value: sum / count as f64,
        })
        .collect()
}

/// Least-squares change per year across the trend points.
///
/// `None` with fewer than two years.
pub fn trend_slope(points: &[TrendPoint]) -> Option<f64> {
    let years: Vec<f64> = points.iter().map(|p| p.year as f64).collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();

    LinearFit::fit(&years, &values).ok().map(|fit| fit.slope)
}
