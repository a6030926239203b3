/// Service configuration loader - parses seismon.toml
///
/// Keeps the user-tunable dashboard knobs (filters, notification threshold,
/// refresh cadence, district selection, feed endpoints) out of the code.
/// Every key is optional; a missing key takes the default listed below.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::ingest::{coordinator, kandilli, usgs};
use crate::locations::DEFAULT_DISTRICTS;

/// File read when neither `--config` nor `SEISMON_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "seismon.toml";
pub const CONFIG_ENV_VAR: &str = "SEISMON_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{key} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_magnitude: f64,
    pub max_distance_km: f64,
    pub lookback_days: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_magnitude: 3.0,
            max_distance_km: 500.0,
            lookback_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub notification_threshold: f64,
    /// Istanbul districts shown on the map; unknown names are ignored.
    pub districts: Vec<String>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            notification_threshold: 4.5,
            districts: DEFAULT_DISTRICTS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            cache_ttl_secs: coordinator::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kandilli_url: String,
    pub kandilli_timeout_secs: u64,
    pub usgs_url: String,
    pub usgs_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kandilli_url: kandilli::KANDILLI_URL.to_string(),
            kandilli_timeout_secs: kandilli::DEFAULT_TIMEOUT_SECS,
            usgs_url: usgs::USGS_QUERY_URL.to_string(),
            usgs_timeout_secs: usgs::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filters: FilterConfig,
    pub alerts: AlertConfig,
    pub refresh: RefreshConfig,
    pub sources: SourceConfig,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_range(key: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value, min, max })
    }
}

impl Config {
    /// Checks every bounded value against the range the dashboard sliders allow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("filters.min_magnitude", self.filters.min_magnitude, 0.0, 10.0)?;
        check_range("filters.max_distance_km", self.filters.max_distance_km, 50.0, 1000.0)?;
        check_range("filters.lookback_days", self.filters.lookback_days as f64, 1.0, 30.0)?;
        check_range("alerts.notification_threshold", self.alerts.notification_threshold, 3.0, 7.0)?;
        check_range("refresh.interval_secs", self.refresh.interval_secs as f64, 30.0, 300.0)?;
        check_range(
            "refresh.cache_ttl_secs",
            self.refresh.cache_ttl_secs as f64,
            coordinator::MIN_CACHE_TTL_SECS as f64,
            coordinator::MAX_CACHE_TTL_SECS as f64,
        )?;
        check_range("sources.kandilli_timeout_secs", self.sources.kandilli_timeout_secs as f64, 1.0, 120.0)?;
        check_range("sources.usgs_timeout_secs", self.sources.usgs_timeout_secs as f64, 1.0, 120.0)?;
        Ok(())
    }
}

/// Parses and validates configuration text.
pub fn parse_config(contents: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from an explicit file. The file must exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents, path)?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Resolves the config path (`--config`, then `SEISMON_CONFIG`, then
/// `./seismon.toml`) and loads it.
///
/// Only the fallback default file may be absent, in which case the built-in
/// defaults are used.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config(Path::new(&path));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_config(default_path)
    } else {
        info!("no {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        Ok(Config::default())
    }
}
