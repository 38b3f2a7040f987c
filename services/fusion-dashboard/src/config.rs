//! Configuration types for the fusion dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Where the Fusion alert service lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_alerts_limit")]
    pub alerts_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            alerts_limit: default_alerts_limit(),
        }
    }
}

impl ApiConfig {
    /// URL of the statistics endpoint
    pub fn stats_url(&self) -> String {
        format!("{}/stats", self.base_url.trim_end_matches('/'))
    }

    /// URL of the alerts endpoint, limit included
    pub fn alerts_url(&self) -> String {
        format!(
            "{}/alerts?limit={}",
            self.base_url.trim_end_matches('/'),
            self.alerts_limit
        )
    }
}

/// Poll timer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Page server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_server_port(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8002".to_string()
}

fn default_alerts_limit() -> u32 {
    50
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_server_port() -> u16 {
    8080
}

impl Config {
    /// Reject values the refresher cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.refresh.interval_ms == 0 {
            return Err(crate::DashboardError::Config(
                "refresh.interval_ms must be greater than zero".to_string(),
            ));
        }
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            crate::DashboardError::Config(format!(
                "Invalid api.base_url {:?}: {}",
                self.api.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::DashboardError::Config(format!(
                "api.base_url must use http or https, got {:?}",
                url.scheme()
            )));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DashboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
