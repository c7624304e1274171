//! # Climate Math
//!
//! Numeric building blocks for seasonal climate outlooks.
//! This crate provides the weighting, dispersion and regression
//! calculations that the forecasting engine composes.

use thiserror::Error;

pub mod dispersion;
pub mod regression;
pub mod weights;

pub use dispersion::{cv_confidence, mean, population_variance_about};
pub use regression::LinearFit;
pub use weights::{harmonic_weights, weighted_mean};

/// Errors that can occur in climate math calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for climate math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InsufficientData("need two points".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need two points"
        );
    }
}
