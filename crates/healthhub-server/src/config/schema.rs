use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use healthhub_core::error::{HealthHubError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HealthHubError::UnsupportedVersion);
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    #[serde(default = "default_growth_months")]
    pub growth_months: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            store_timeout_ms: default_store_timeout_ms(),
            growth_months: default_growth_months(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=30000).contains(&self.store_timeout_ms) {
            return Err(HealthHubError::BadRequest(
                "server.store_timeout_ms must be between 100 and 30000".into(),
            ));
        }
        if !(1..=24).contains(&self.growth_months) {
            return Err(HealthHubError::BadRequest(
                "server.growth_months must be between 1 and 24".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            HealthHubError::BadRequest(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_store_timeout_ms() -> u64 {
    2000
}
fn default_growth_months() -> usize {
    6
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// JSON array of users loaded into the in-memory store at startup.
    #[serde(default)]
    pub seed_path: Option<String>,
}
