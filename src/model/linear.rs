use super::{FeatureSchema, FeatureVector, Model, check_row_width};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ordinary least squares style model: `intercept + Σ coefficients[i] * x[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub schema: FeatureSchema,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.len() != self.schema.width() {
            return Err(Error::invalid_model(format!(
                "linear model has {} coefficients but schema {} has {} features",
                self.coefficients.len(),
                self.schema,
                self.schema.width()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::invalid_model(
                "linear model parameters must be finite numbers",
            ));
        }
        Ok(())
    }
}

impl Model for LinearModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>> {
        batch
            .iter()
            .map(|row| {
                check_row_width(row, self.coefficients.len())?;
                let dot: f64 = row
                    .values()
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, w)| x.as_f64() * w)
                    .sum();
                Ok(self.intercept + dot)
            })
            .collect()
    }
}
