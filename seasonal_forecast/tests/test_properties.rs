use approx::assert_relative_eq;
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seasonal_forecast::data::{parse_observation_date, valid_observations};
use seasonal_forecast::{
    aggregate_trend, DistributionSynthesizer, HistoricalSeries, SeasonalForecaster,
    SeasonalWindow, TargetDate, VariableSeries,
};

const CODES: [&str; 5] = ["PRECTOTCORR", "T2M", "WS2M", "RH2M", "PS"];

/// Five years of daily data with gaps, fill values and the odd bad date
fn random_series(rng: &mut StdRng) -> HistoricalSeries {
    let mut series = HistoricalSeries::new();
    for code in CODES {
        let base: f64 = rng.gen_range(-20.0..120.0);
        let spread: f64 = rng.gen_range(0.0..15.0);
        let mut values = VariableSeries::new();
        for year in 2021..=2025 {
            for month in 1..=12u32 {
                for day in 1..=31u32 {
                    let key = format!("{}{:02}{:02}", year, month, day);
                    let value = if rng.gen_bool(0.05) {
                        f64::NAN
                    } else {
                        base + rng.gen_range(-1.0..=1.0) * spread
                    };
                    values.insert(key, value);
                }
            }
        }
        values.insert("2024xx01".to_string(), 1.0);
        series = series.with_parameter(code, values);
    }
    series
}

fn random_target(rng: &mut StdRng) -> TargetDate {
    loop {
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=31);
        if let Ok(target) = TargetDate::from_ymd(2026, month, day) {
            return target;
        }
    }
}

#[test]
fn test_window_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let window = SeasonalWindow::default();

    for _ in 0..25 {
        let series = random_series(&mut rng);
        let target = random_target(&mut rng);

        for code in CODES {
            let observations = window.extract(series.parameter(code).unwrap(), &target);
            for obs in &observations {
                assert_eq!(obs.date.month(), target.month());
                assert!(obs.date.day().abs_diff(target.day()) <= 7);
                assert!(obs.value.is_finite());
            }
            assert!(observations.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }
}

#[test]
fn test_prediction_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    let forecaster = SeasonalForecaster::default();

    for _ in 0..25 {
        let series = random_series(&mut rng);
        let target = random_target(&mut rng);
        let report = forecaster.forecast(&series, &target).unwrap();

        for prediction in report.predictions.values() {
            assert!(prediction.samples >= 1);
            assert!(prediction.std_dev >= 0.0);
            assert!((0.0..=100.0).contains(&prediction.confidence));
            assert!(prediction.range.min <= prediction.value);
            assert!(prediction.value <= prediction.range.max);
            assert_relative_eq!(
                prediction.range.max - prediction.range.min,
                2.0 * prediction.std_dev,
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_distribution_invariants() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..50 {
        let samples = rng.gen_range(1..=120);
        let mean: f64 = rng.gen_range(-50.0..50.0);
        let std_dev: f64 = rng.gen_range(0.01..20.0);

        let curve = DistributionSynthesizer::new(samples)
            .unwrap()
            .synthesize(mean, std_dev)
            .unwrap();
        let step = 4.0 * std_dev / samples as f64;

        assert_eq!(curve.len(), samples);
        assert!(curve.windows(2).all(|w| w[0].value < w[1].value));
        assert_relative_eq!(curve[0].value, mean - 2.0 * std_dev, epsilon = 1e-9);
        assert_relative_eq!(
            curve[samples - 1].value,
            mean + 2.0 * std_dev - step,
            epsilon = 1e-9
        );
        assert!(curve.iter().all(|p| p.probability > 0.0));
    }
}

#[test]
fn test_trend_matches_recomputation() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        let series = random_series(&mut rng);
        let target = random_target(&mut rng);

        for code in CODES {
            let values = series.parameter(code).unwrap();
            let trend = aggregate_trend(values, &target);

            assert!(trend.windows(2).all(|w| w[0].year < w[1].year));
            for point in &trend {
                let same_month: Vec<f64> = valid_observations(values)
                    .filter(|(d, _)| d.year() == point.year && d.month() == target.month())
                    .map(|(_, v)| v)
                    .collect();
                assert!(!same_month.is_empty());
                let mean = same_month.iter().sum::<f64>() / same_month.len() as f64;
                assert_relative_eq!(point.value, mean, epsilon = 1e-9);
            }

            // Every year with usable target-month data is present
            let years_with_data = values
                .keys()
                .filter_map(|k| parse_observation_date(k))
                .filter(|d| d.month() == target.month())
                .filter(|d| values[&d.format("%Y%m%d").to_string()].is_finite())
                .map(|d| d.year())
                .collect::<std::collections::BTreeSet<_>>();
            assert_eq!(trend.len(), years_with_data.len());
        }
    }
}
