use super::{coerce::coerce, validator};
use crate::{
    Error, Result,
    model::{FeatureSchema, FeatureVector, Model},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Turns a request body into a rounded price using an injected model.
#[derive(Clone)]
pub struct PredictionPipeline {
    model: Arc<dyn Model>,
    schema: Arc<FeatureSchema>,
}

impl PredictionPipeline {
    /// Builds a pipeline for the house-price schema, refusing models trained
    /// on any other layout.
    pub fn new(model: Arc<dyn Model>) -> Result<Self> {
        Self::with_schema(model, FeatureSchema::house_price())
    }

    pub fn with_schema(model: Arc<dyn Model>, schema: FeatureSchema) -> Result<Self> {
        if model.schema() != &schema {
            return Err(Error::SchemaMismatch {
                model: model.schema().to_string(),
                service: schema.to_string(),
            });
        }
        Ok(Self {
            model,
            schema: Arc::new(schema),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Parses, validates and coerces a raw body into a feature vector.
    pub fn prepare(&self, body: &[u8]) -> Result<FeatureVector> {
        let map = validator::parse_body(body)?;
        self.features_from_map(&map)
    }

    pub fn features_from_map(&self, body: &Map<String, Value>) -> Result<FeatureVector> {
        validator::validate_required(body, &self.schema)?;

        let values = self
            .schema
            .features
            .iter()
            .map(|spec| coerce(&spec.name, spec.kind, &body[spec.name.as_str()]))
            .collect::<Result<Vec<_>>>()?;

        Ok(FeatureVector::new(values))
    }

    /// Runs the model on a single row. Blocks for the duration of inference.
    pub fn invoke(&self, features: FeatureVector) -> Result<f64> {
        let batch = [features];
        debug!("Invoking model on batch of {} row(s)", batch.len());

        let output = self.model.predict(&batch)?;
        let raw = output
            .first()
            .copied()
            .ok_or_else(|| Error::inference("model returned an empty batch"))?;
        if !raw.is_finite() {
            return Err(Error::inference(format!(
                "model returned a non-finite prediction: {}",
                raw
            )));
        }
        Ok(round_price(raw))
    }

    /// Full synchronous pipeline from raw body to rounded price.
    pub fn predict(&self, body: &[u8]) -> Result<f64> {
        let features = self.prepare(body)?;
        self.invoke(features)
    }
}

/// Rounds to two decimal places, ties to even.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
