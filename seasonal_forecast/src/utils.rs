//! Utility functions for the seasonal_forecast crate

use crate::data::DATE_FORMAT;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Span of completed calendar years used as the historical reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferencePeriod {
    pub start_year: i32,
    pub end_year: i32,
}

impl ReferencePeriod {
    /// The `years` most recently completed years before `current_year`.
    ///
    /// ```
    /// use seasonal_forecast::utils::ReferencePeriod;
    ///
    /// let period = ReferencePeriod::preceding(2026, 5).unwrap();
    /// assert_eq!((period.start_year, period.end_year), (2021, 2025));
    /// assert_eq!(period.start_date(), "20210101");
    /// assert_eq!(period.end_date(), "20251231");
    /// ```
    pub fn preceding(current_year: i32, years: u32) -> Result<Self> {
        if years == 0 {
            return Err(ForecastError::InvalidParameter(
                "Reference period must span at least one year".to_string(),
            ));
        }
        let span = i32::try_from(years).map_err(|_| {
            ForecastError::InvalidParameter(format!("Reference period of {} years is too long", years))
        })?;

        match (current_year.checked_sub(span), current_year.checked_sub(1)) {
            (Some(start_year), Some(end_year)) => Ok(Self {
                start_year,
                end_year,
            }),
            _ => Err(ForecastError::InvalidParameter(format!(
                "No {}-year reference period precedes year {}",
                years, current_year
            ))),
        }
    }

    /// Number of years covered
    pub fn years(&self) -> u32 {
        (self.end_year - self.start_year + 1).max(0) as u32
    }

    /// First day of the period as `YYYYMMDD`
    pub fn start_date(&self) -> String {
        format!("{:04}0101", self.start_year)
    }

    /// Last day of the period as `YYYYMMDD`
    pub fn end_date(&self) -> String {
        format!("{:04}1231", self.end_year)
    }
}

/// Format a date the way the data provider keys observations
pub fn provider_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_period() {
        let period = ReferencePeriod::preceding(2026, 5).unwrap();
        assert_eq!(period.start_year, 2021);
        assert_eq!(period.end_year, 2025);
        assert_eq!(period.years(), 5);

        let single = ReferencePeriod::preceding(2026, 1).unwrap();
        assert_eq!(single.start_date(), "20250101");
        assert_eq!(single.end_date(), "20251231");

        assert!(ReferencePeriod::preceding(2026, 0).is_err());
    }

    #[test]
    fn test_reference_period_year_underflow() {
        assert!(matches!(
            ReferencePeriod::preceding(i32::MIN, 5),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            ReferencePeriod::preceding(i32::MIN + 2, 3),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(ReferencePeriod::preceding(i32::MIN + 5, 5).is_ok());
    }

    #[test]
    fn test_provider_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(provider_date(date), "20240209");
    }
}
