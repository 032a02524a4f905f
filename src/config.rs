//! Application configuration loaded from a YAML file.
//!
//! The pipeline never reads ambient global state; `main` resolves the
//! config file and CLI flags into plain values and passes them down. The
//! file is optional — with no file present the built-in outlet defaults
//! apply and the API key must come from the CLI or environment.
//!
//! ```yaml
//! outlets:
//!   - https://bbc.com/news
//!   - https://edition.cnn.com
//! keywords: flood, wildfire
//! analysis:
//!   model: gpt-4o-mini
//!   max_tokens: 4000
//!   # api_base: https://my-gateway.example/v1
//!   # api_key: sk-...
//! ```

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

/// Outlets scraped when the caller does not override them.
pub const DEFAULT_OUTLETS: [&str; 2] = ["https://bbc.com/news", "https://edition.cnn.com"];

/// Default path probed when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Outlet root URLs; the first two are scraped unless overridden.
    pub outlets: Vec<String>,
    /// Optional default comma-delimited keyword string.
    pub keywords: Option<String>,
    /// Analysis service settings.
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Model name requested from the analysis service.
    pub model: String,
    /// Response token cap for the analysis call.
    pub max_tokens: u32,
    /// Override for OpenAI-compatible gateways; `None` uses the provider default.
    pub api_base: Option<String>,
    /// Credential material; CLI/environment takes precedence when both are set.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outlets: DEFAULT_OUTLETS.map(String::from).to_vec(),
            keywords: None,
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 4000,
            api_base: None,
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config file {path}: {e}"))?;
        let config: Config =
            serde_yaml::from_str(&raw).map_err(|e| format!("invalid config file {path}: {e}"))?;
        info!(%path, outlets = config.outlets.len(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve configuration for a run: an explicit `--config` path must
    /// load, the default path loads when present, anything else falls back
    /// to the built-in defaults.
    pub fn resolve(explicit_path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match explicit_path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No config file found; using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}
