use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub predicted_price: f64,
}
