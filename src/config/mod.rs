//! Configuration management.
//!
//! Settings come from an optional TOML file layered with
//! `RESEARCH_HUB_*` environment variables:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! timeout_seconds = 30
//!
//! [search]
//! per_page = 25
//! from_year = 1980
//! country_code = "US"
//!
//! [prefetch]
//! enabled = true
//! lookahead = 4
//! hard_limit = 400
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Prefetch tuning
    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Research Network Hub backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results per page
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Default starting year filter
    #[serde(default = "default_from_year")]
    pub from_year: i32,

    /// Default country code filter
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            from_year: default_from_year(),
            country_code: default_country_code(),
        }
    }
}

fn default_per_page() -> usize {
    25
}

fn default_from_year() -> i32 {
    crate::models::DEFAULT_FROM_YEAR
}

fn default_country_code() -> String {
    crate::models::DEFAULT_COUNTRY_CODE.to_string()
}

/// Prefetch tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Whether speculative prefetch is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Pages prefetched past the current one
    #[serde(default = "default_lookahead")]
    pub lookahead: u32,

    /// Highest page number the prefetcher will request
    #[serde(default = "default_hard_limit")]
    pub hard_limit: u32,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lookahead: default_lookahead(),
            hard_limit: default_hard_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_lookahead() -> u32 {
    crate::pager::prefetch::DEFAULT_LOOKAHEAD
}

fn default_hard_limit() -> u32 {
    crate::pager::prefetch::DEFAULT_HARD_LIMIT
}

/// Load configuration from a file, with environment overrides.
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("RESEARCH_HUB").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Find a config file: `./research-hub.toml` first, then the platform
/// config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("research-hub.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("research-hub").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the default configuration.
pub fn get_config() -> Config {
    Config::default()
}
