//! Ordinary least-squares line fitting for trend estimation

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a least-squares line through the `(x, y)` pairs
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for a line fit".to_string(),
            ));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::InvalidInput(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self { slope, intercept })
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line() {
        let xs = [2019.0, 2020.0, 2021.0, 2022.0];
        let ys = [10.0, 10.5, 11.0, 11.5];
        let fit = LinearFit::fit(&xs, &ys).unwrap();

        assert_relative_eq!(fit.slope, 0.5, epsilon = 1e-9);
        assert_relative_eq!(fit.predict(2023.0), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_series() {
        let fit = LinearFit::fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_relative_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 4.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(
            LinearFit::fit(&[1.0], &[1.0]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            LinearFit::fit(&[1.0, 1.0], &[1.0, 2.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_err());
    }
}
