//! # Configs
//!
//! Layered configuration for the chirp binary: hard defaults, then an
//! optional `chirp.toml` next to the working directory, then `CHIRP_*`
//! environment variables (with `.env` support). Secrets stay wrapped in
//! [`secrecy`] so they never end up in logs.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub backend: BackendSettings,
    #[serde(default)]
    pub viewer: ViewerSettings,
    pub scroll: ScrollSettings,
}

/// Where the backend lives and how to authenticate against it.
#[derive(Debug, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    /// The `token` cookie value the backend minted at login.
    #[serde(default)]
    pub session_token: Option<SecretString>,
    pub request_timeout_secs: u64,
}

/// Identity of the signed-in viewer, used only to decide which cards get
/// owner controls. `None` renders the unauthenticated timeline.
#[derive(Debug, Default, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ScrollSettings {
    pub threshold_px: f64,
}

impl AppConfig {
    /// Defaults → `chirp.toml` (optional) → `CHIRP_*` environment, e.g.
    /// `CHIRP_BACKEND__BASE_URL=https://sns.example`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::defaults()?
            .add_source(File::with_name("chirp").required(false))
            .add_source(Environment::with_prefix("CHIRP").separator("__"))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        tracing::debug!(base_url = %config.backend.base_url, "configuration loaded");
        Ok(config)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("backend.base_url", "http://127.0.0.1:9090")?
            .set_default("backend.request_timeout_secs", 10_i64)?
            .set_default("scroll.threshold_px", 1000.0)?)
    }
}
