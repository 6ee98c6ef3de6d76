//! Configuration management using Figment
//!
//! Configuration is loaded from the following sources, highest precedence first:
//! 1. Environment variables (prefix: `DOFUSDB_`, e.g. `DOFUSDB_ENVIRONMENT=beta`)
//! 2. `./dofusdb.toml` in the current working directory
//! 3. Default values

use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Base URL of the production API
pub const PRODUCTION_URL: &str = "https://api.dofusdb.fr/";

/// Base URL of the beta API
pub const BETA_URL: &str = "https://api.beta.dofusdb.fr/";

/// Default configuration file name
pub const CONFIG_FILE: &str = "dofusdb.toml";

/// Which deployment of the API to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Beta,
}

impl Environment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Beta => BETA_URL,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Target deployment
    #[serde(default)]
    pub environment: Environment,

    /// Explicit base URL, overriding `environment`
    #[serde(default)]
    pub base_url: Option<String>,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout applied by the HTTP client
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Log filter directive (e.g. `info`, `dofusdb_client=debug`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_user_agent() -> String {
    concat!("dofusdb-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults, `./dofusdb.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is skipped; environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(ClientConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DOFUSDB_"));

        Self::from_figment(figment)
    }

    /// Extract configuration from an already assembled figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = figment.extract()?;
        Ok(config)
    }

    /// The effective base URL, always ending with `/`
    pub fn base_url(&self) -> Result<Url> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url());
        normalize_base_url(raw)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse a base URL, appending the trailing slash resource paths are joined onto
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
