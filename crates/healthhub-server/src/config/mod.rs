//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use healthhub_core::error::{HealthHubError, Result};

pub use schema::{ServerConfig, ServerSection, StoreSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "HEALTHHUB_CONFIG";
/// Config file used when `HEALTHHUB_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "healthhub.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HealthHubError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| HealthHubError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
