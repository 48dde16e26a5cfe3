mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let mut config = load_or_default(
        env::var("CONFIG_PATH").ok().as_deref(),
        Path::new(DEFAULT_CONFIG_PATH),
    )
    .await?;

    apply_env_overrides(
        &mut config,
        env::var("PORT").ok().as_deref(),
        env::var("MODEL_PATH").ok().as_deref(),
    )?;

    Ok(config)
}

/// An explicit path must be readable; a missing default file means defaults.
pub async fn load_or_default(explicit: Option<&str>, default_path: &Path) -> Result<Config> {
    match explicit {
        Some(path) => load_from(path).await,
        None if default_path.exists() => load_from(default_path).await,
        None => {
            debug!(
                "No {} found, using built-in defaults",
                default_path.display()
            );
            Ok(Config::default())
        }
    }
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(yaml: &str) -> Result<Config> {
    // An empty file deserializes to null, which means "all defaults".
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// `PORT` and `MODEL_PATH` win over the file.
pub fn apply_env_overrides(
    config: &mut Config,
    port: Option<&str>,
    model_path: Option<&str>,
) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    if let Some(path) = model_path {
        config.model.path = path.to_string();
    }
    Ok(())
}
