use anyhow::Result;
use house_price::{config, model, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            if let Err(e) = validate_log_level(&log_level) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            tracing_subscriber::EnvFilter::new(&log_level)
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting house price server with log level: {}", log_level);
    info!("Configuration loaded successfully");

    // The model is loaded exactly once and shared read-only by every request
    let model = model::load_model(&config.model.path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load model '{}': {}", config.model.path, e))?;

    server::run(config, model).await?;

    Ok(())
}
