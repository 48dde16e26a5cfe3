use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use house_price::{model::Model, prediction::PredictionPipeline, server};
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceExt; // for `oneshot`

/// The reference request: every field present and valid.
pub fn valid_request() -> Value {
    json!({
        "bathrooms": 2,
        "square_footage": 1500,
        "lot_size": 5000,
        "year_built": 1998,
        "bedrooms": 3
    })
}

pub fn create_test_app(model: Arc<dyn Model>) -> Router {
    let pipeline = PredictionPipeline::new(model).unwrap();
    server::router(pipeline, true)
}

/// Path of the sample artifact shipped with the repository.
pub fn sample_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/house_price_model.json")
}

pub async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

/// Number of digits after the decimal point in the JSON rendering of `value`.
pub fn decimal_places(value: &Value) -> usize {
    let text = value.to_string();
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}
