use house_price::{
    Error, Result,
    model::{FeatureSchema, FeatureVector, Model},
};
use std::sync::{Arc, Mutex};

/// Mock model for testing
#[derive(Debug)]
pub struct MockModel {
    pub schema: FeatureSchema,
    pub output: Vec<f64>,
    pub batches: Arc<Mutex<Vec<Vec<FeatureVector>>>>,
    pub error: Option<String>,
    pub panic: bool,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            schema: FeatureSchema::house_price(),
            output: vec![250_000.0],
            batches: Arc::new(Mutex::new(Vec::new())),
            error: None,
            panic: false,
        }
    }

    pub fn with_output(mut self, output: Vec<f64>) -> Self {
        self.output = output;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_schema(mut self, schema: FeatureSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic = true;
        self
    }

    pub fn get_batches(&self) -> Vec<Vec<FeatureVector>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Model for MockModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>> {
        self.batches.lock().unwrap().push(batch.to_vec());

        if self.panic {
            panic!("mock model exploded");
        }

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }

        Ok(self.output.clone())
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}
