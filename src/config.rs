use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::compat::types::BrowserVersions;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default dataset cache lifetime in milliseconds (24 hours)
pub const DEFAULT_CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Timeout for dataset fetches in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// Dataset sources
// =============================================================================

pub const DEFAULT_TABULAR_URL: &str =
    "https://raw.githubusercontent.com/Fyrd/caniuse/main/fulldata-json/data-2.0.json";

pub const DEFAULT_HIERARCHICAL_URL: &str =
    "https://unpkg.com/@mdn/browser-compat-data/data.json";

/// Browser versions assumed when the tabular dataset cannot provide them
pub const FALLBACK_CHROME_VERSION: &str = "141";
pub const FALLBACK_FIREFOX_VERSION: &str = "143";
pub const FALLBACK_SAFARI_VERSION: &str = "26.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Engine configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub cache: CacheConfig,
    pub datasets: DatasetsConfig,
    pub fallback_versions: FallbackVersionsConfig,
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Dataset cache lifetime in milliseconds
    pub ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL_MS,
        }
    }
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetsConfig {
    pub tabular_url: String,
    pub hierarchical_url: String,
    /// Fetch timeout in milliseconds
    pub timeout: u64,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            tabular_url: DEFAULT_TABULAR_URL.to_string(),
            hierarchical_url: DEFAULT_HIERARCHICAL_URL.to_string(),
            timeout: FETCH_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FallbackVersionsConfig {
    pub chrome: String,
    pub firefox: String,
    pub safari: String,
}

impl Default for FallbackVersionsConfig {
    fn default() -> Self {
        Self {
            chrome: FALLBACK_CHROME_VERSION.to_string(),
            firefox: FALLBACK_FIREFOX_VERSION.to_string(),
            safari: FALLBACK_SAFARI_VERSION.to_string(),
        }
    }
}

impl From<FallbackVersionsConfig> for BrowserVersions {
    fn from(config: FallbackVersionsConfig) -> Self {
        Self {
            chrome: config.chrome,
            firefox: config.firefox,
            safari: config.safari,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, using defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for compat-score.
/// Uses $XDG_DATA_HOME/compat-score if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/compat-score,
/// or ./compat-score if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("compat-score.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("compat-score")
}
