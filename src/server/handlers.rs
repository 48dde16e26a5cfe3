use super::types::PredictResponse;
use crate::{
    Error,
    prediction::{PredictionPipeline, validator},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, header::CONTENT_TYPE},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
}

pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PredictResponse>, Error> {
    let request_id = Uuid::new_v4();
    info!(
        "Received prediction request {} ({} bytes)",
        request_id,
        body.len()
    );

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    match run_pipeline(state.pipeline, content_type, body).await {
        Ok(predicted_price) => {
            info!(
                "Prediction request {} succeeded: {}",
                request_id, predicted_price
            );
            Ok(Json(PredictResponse { predicted_price }))
        }
        Err(e @ Error::Validation { .. }) => {
            warn!("Prediction request {} rejected: {}", request_id, e);
            Err(e)
        }
        Err(e) => {
            error!("Prediction request {} failed: {}", request_id, e);
            Err(e)
        }
    }
}

async fn run_pipeline(
    pipeline: Arc<PredictionPipeline>,
    content_type: Option<&str>,
    body: Bytes,
) -> crate::Result<f64> {
    validator::check_content_type(content_type)?;
    let features = pipeline.prepare(&body)?;

    // Inference is CPU bound, keep it off the async workers.
    tokio::task::spawn_blocking(move || pipeline.invoke(features))
        .await
        .map_err(|e| Error::inference(format!("model worker failed: {}", e)))?
}
