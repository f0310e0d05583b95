mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;

    if let Ok(base_url) = env::var("SERVICE_BASE_URL") {
        debug!("Service base URL overridden from environment: {}", base_url);
        config.service.base_url = base_url;
    }

    validate(&config)?;
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    reqwest::Url::parse(&config.service.base_url).map_err(|e| {
        Error::config(format!(
            "Invalid service base_url '{}': {}",
            config.service.base_url, e
        ))
    })?;

    if let Some(base_url) = &config.gallery.base_url {
        reqwest::Url::parse(base_url).map_err(|e| {
            Error::config(format!("Invalid gallery base_url '{}': {}", base_url, e))
        })?;
    }

    for path in [&config.service.analyze_path, &config.service.narrative_path] {
        if !path.starts_with('/') {
            return Err(Error::config(format!(
                "Endpoint path must start with '/': {}",
                path
            )));
        }
    }

    if config.service.timeout_secs == 0 {
        return Err(Error::config("service.timeout_secs must be greater than 0"));
    }

    Ok(())
}
