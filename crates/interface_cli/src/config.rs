//! CLI configuration

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use infra_http::{HttpClientConfig, HttpConfigError, DEFAULT_BASE_URL};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "claims-client";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Prediction service base URL
    pub base_url: String,
    /// Request timeout in seconds; unset keeps the transport default
    pub timeout_secs: Option<u64>,
    /// User agent override
    pub user_agent: Option<String>,
    /// Log level
    pub log_level: String,
    /// Log format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl CliConfig {
    /// Loads configuration from defaults, a config file, and the environment
    ///
    /// Later sources win: defaults, then `file` (or an optional
    /// `claims-client.toml` in the working directory), then `CLAIMS_*`
    /// environment variables such as `CLAIMS_BASE_URL`.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?;

        let builder = match file {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(config::Environment::with_prefix("CLAIMS").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Builds the HTTP adapter configuration
    pub fn http_config(&self) -> Result<HttpClientConfig, HttpConfigError> {
        let mut http = HttpClientConfig::new(&self.base_url)?;
        if let Some(secs) = self.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.user_agent {
            http = http.user_agent(user_agent.clone());
        }
        Ok(http)
    }
}
