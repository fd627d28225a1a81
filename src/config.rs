//! Configuration module.
//!
//! Loads `config.toml` from the config directory (`--config-dir`, default the
//! working directory), merges it over the stock defaults, rejects unknown keys
//! and validates the result.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "https://api.unsplash.com"
//! access_key = ""                          # inline key (takes precedence)
//! access_key_env = "UNSPLASH_ACCESS_KEY"   # env var read when access_key is empty
//! timeout_secs = 10
//!
//! [fetch]
//! count = 10                 # photos per refresh (1-30)
//! content_filter = "high"    # "low" or "high"
//! topics = []                # topic slugs or ids
//! max_requests_per_hour = 50 # advisory client-side budget
//! cooldown_secs = 3600       # pause after the API reports a rate limit
//!
//! [discover]
//! max_attempts = 10          # draws before giving up on banned results
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [fetch]
//! topics = ["nature", "travel"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the config file inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Upper limit the random-photo endpoint accepts for `count`.
pub const MAX_COUNT: u32 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoutConfig {
    /// Upstream API endpoint and credentials.
    pub api: ApiConfig,
    /// Batch size, content filter and client-side throttling.
    pub fetch: FetchConfig,
    /// Single-photo draw settings.
    pub discover: DiscoverConfig,
}

impl ScoutConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be non-zero".into(),
            ));
        }
        if self.fetch.count == 0 || self.fetch.count > MAX_COUNT {
            return Err(ConfigError::Validation(format!(
                "fetch.count must be 1-{MAX_COUNT}"
            )));
        }
        if self.fetch.max_requests_per_hour == 0 {
            return Err(ConfigError::Validation(
                "fetch.max_requests_per_hour must be non-zero".into(),
            ));
        }
        if self.discover.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "discover.max_attempts must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Access key sent as `Authorization: Client-ID <key>`.
    pub access_key: String,
    /// Environment variable consulted when `access_key` is empty.
    pub access_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com".to_string(),
            access_key: String::new(),
            access_key_env: "UNSPLASH_ACCESS_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Inline key, else the named environment variable, else empty.
    pub fn resolve_access_key(&self) -> String {
        if !self.access_key.trim().is_empty() {
            return self.access_key.trim().to_string();
        }
        std::env::var(&self.access_key_env)
            .map(|k| k.trim().to_string())
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Content safety level passed to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFilter {
    Low,
    #[default]
    High,
}

impl ContentFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Batch fetch and throttling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Photos requested per refresh.
    pub count: u32,
    pub content_filter: ContentFilter,
    /// Topic slugs or ids; empty means any topic.
    pub topics: Vec<String>,
    /// Advisory request budget per rolling hour.
    pub max_requests_per_hour: u32,
    /// Seconds to suspend fetching after the API reports a rate limit.
    pub cooldown_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            count: 10,
            content_filter: ContentFilter::High,
            topics: Vec::new(),
            max_requests_per_hour: 50,
            cooldown_secs: 3600,
        }
    }
}

/// Single-photo draw settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverConfig {
    /// Maximum draws per `discover` before reporting exhaustion.
    pub max_attempts: u32,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self { max_attempts: 10 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ScoutConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ScoutConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ScoutConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<ScoutConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    log::debug!("loaded config from {}", dir.join(CONFIG_FILENAME).display());
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-scout Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Upstream API
# ---------------------------------------------------------------------------
[api]
base_url = "https://api.unsplash.com"

# Access key sent as "Authorization: Client-ID <key>".
# Leave empty to read it from the environment variable below.
access_key = ""
access_key_env = "UNSPLASH_ACCESS_KEY"

# Per-request timeout in seconds.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Batch fetching
# ---------------------------------------------------------------------------
[fetch]
# Photos requested per `fetch` (1-30).
count = 10

# Content safety level: "low" or "high".
content_filter = "high"

# Restrict results to these topic slugs or ids. Empty means any topic.
topics = []

# Advisory client-side budget. Requests beyond this within one hour are
# refused locally without contacting the API.
max_requests_per_hour = 50

# After the API answers 403 (rate limited), refuse further requests for
# this many seconds. The resume time survives between runs.
cooldown_secs = 3600

# ---------------------------------------------------------------------------
# Single-photo discovery
# ---------------------------------------------------------------------------
[discover]
# Draws per `discover` before giving up when every result is banned.
max_attempts = 10
"##
}
