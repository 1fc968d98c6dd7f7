//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//!
//! 1. Environment variables (GEOSCOPE_*)
//! 2. TOML config file (if GEOSCOPE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the API binds to.
    ///
    /// Set via GEOSCOPE_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite AOI database.
    ///
    /// Set via GEOSCOPE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the upstream WMS server feature lookups are proxied to.
    ///
    /// Set via GEOSCOPE_WMS_BASE_URL environment variable.
    #[serde(default = "default_wms_base_url")]
    pub wms_base_url: String,

    /// User-Agent string for upstream requests.
    ///
    /// Set via GEOSCOPE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via GEOSCOPE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes accepted from one upstream response.
    ///
    /// Set via GEOSCOPE_MAX_RESPONSE_BYTES environment variable.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,

    /// Feature-cache entry lifetime in seconds.
    ///
    /// Set via GEOSCOPE_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Feature-cache live-entry ceiling.
    ///
    /// Set via GEOSCOPE_CACHE_MAX_ENTRIES environment variable.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Period of the background cache sweep in seconds.
    ///
    /// Set via GEOSCOPE_SWEEP_INTERVAL_SECS environment variable.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Simplification tolerance for incoming AOI rings, in degrees.
    ///
    /// Set via GEOSCOPE_SIMPLIFY_TOLERANCE_DEG environment variable.
    #[serde(default = "default_simplify_tolerance_deg")]
    pub simplify_tolerance_deg: f64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./geoscope-aois.sqlite")
}

fn default_wms_base_url() -> String {
    "http://localhost:8600/wms".into()
}

fn default_user_agent() -> String {
    "geoscope/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_response_bytes() -> usize {
    2_097_152 // 2MB
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_entries() -> usize {
    1000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_simplify_tolerance_deg() -> f64 {
    crate::geometry::DEFAULT_TOLERANCE_DEG
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            wms_base_url: default_wms_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            sweep_interval_secs: default_sweep_interval_secs(),
            simplify_tolerance_deg: default_simplify_tolerance_deg(),
        }
    }
}

impl AppConfig {
    /// Upstream timeout as a Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Feature-cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Background sweep period as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GEOSCOPE_`
    /// 2. TOML file from `GEOSCOPE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GEOSCOPE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GEOSCOPE_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.db_path, PathBuf::from("./geoscope-aois.sqlite"));
        assert_eq!(config.wms_base_url, "http://localhost:8600/wms");
        assert_eq!(config.user_agent, "geoscope/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_response_bytes, 2_097_152);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.sweep_interval_secs, 60);
        assert_eq!(config.simplify_tolerance_deg, 1e-4);
    }

    #[test]
    fn test_duration_accessors() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
    }
}
