mod handlers;
mod types;

pub use types::PredictResponse;

use crate::{config::Config, model::Model, prediction::PredictionPipeline, Result};
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds the application router around an already validated pipeline.
pub fn router(pipeline: PredictionPipeline, cors: bool) -> Router {
    let app_state = handlers::AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = Router::new()
        .route("/predict", post(handlers::predict))
        .with_state(app_state)
        // Requests are not size-capped.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn run(config: Config, model: Arc<dyn Model>) -> Result<()> {
    let pipeline = PredictionPipeline::new(model)?;
    info!("Serving predictions with schema {}", pipeline.schema());

    let app = router(pipeline, config.server.cors);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
