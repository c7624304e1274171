//! Catalog of forecastable weather variables

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// A weather variable the engine can forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Short identifier, e.g. `temperature`
    pub key: String,
    /// Provider parameter code, e.g. `T2M`
    pub code: String,
    /// Human-readable label
    pub label: String,
    /// Measurement unit
    pub unit: String,
}

impl Variable {
    pub fn new(
        key: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            label: label.into(),
            unit: unit.into(),
        }
    }
}

/// Ordered set of variables requested for a forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableCatalog {
    variables: Vec<Variable>,
}

impl Default for VariableCatalog {
    /// Precipitation, temperature, wind, humidity and pressure
    fn default() -> Self {
        Self {
            variables: vec![
                Variable::new("precipitation", "PRECTOTCORR", "Precipitation", "mm"),
                Variable::new("temperature", "T2M", "Temperature", "°C"),
                Variable::new("wind", "WS2M", "Wind Speed", "m/s"),
                Variable::new("humidity", "RH2M", "Humidity", "%"),
                Variable::new("pressure", "PS", "Pressure", "kPa"),
            ],
        }
    }
}

impl VariableCatalog {
    /// Build a catalog, rejecting duplicate parameter codes
    pub fn new(variables: Vec<Variable>) -> Result<Self> {
        let catalog = Self { variables };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the catalog is non-empty and codes are unique
    pub fn validate(&self) -> Result<()> {
        if self.variables.is_empty() {
            return Err(ForecastError::ValidationError(
                "Variable catalog must not be empty".to_string(),
            ));
        }
        for (i, variable) in self.variables.iter().enumerate() {
            if variable.code.trim().is_empty() {
                return Err(ForecastError::ValidationError(format!(
                    "Variable '{}' has an empty parameter code",
                    variable.key
                )));
            }
            if self.variables[..i].iter().any(|v| v.code == variable.code) {
                return Err(ForecastError::ValidationError(format!(
                    "Duplicate parameter code '{}' in catalog",
                    variable.code
                )));
            }
        }
        Ok(())
    }

    /// Look a variable up by parameter code
    pub fn get(&self, code: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.code == code)
    }

    /// Look a variable up by its short key
    pub fn by_key(&self, key: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.key == key)
    }

    /// Parameter codes in catalog order
    pub fn codes(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
