use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_CENSUS_YEAR, FCC_CENSUS_BLOCK_URL, GOOGLE_GEOCODE_URL,
};
use crate::error::{AdiError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Census year sent with every block lookup.
    pub census_year: u16,
    pub paths: PathsConfig,
    pub geocoder: GeocoderConfig,
    pub census_block: CensusBlockConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub addresses_file: PathBuf,
    pub adi_data_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CensusBlockConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitConfig {
    pub base_delay_ms: u64,
    pub max_jitter_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            census_year: DEFAULT_CENSUS_YEAR,
            paths: PathsConfig::default(),
            geocoder: GeocoderConfig::default(),
            census_block: CensusBlockConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            addresses_file: PathBuf::from("addresses.csv"),
            adi_data_dir: PathBuf::from("adi-data"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_GEOCODE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for CensusBlockConfig {
    fn default() -> Self {
        Self {
            base_url: FCC_CENSUS_BLOCK_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_jitter_ms: 500,
        }
    }
}

impl RateLimitConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.max_jitter_ms)
    }
}

impl Config {
    /// Reads `config.toml` from the working directory, falling back to defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            AdiError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.max_jitter_ms >= self.rate_limit.base_delay_ms {
            return Err(AdiError::Config(format!(
                "rate_limit.max_jitter_ms ({}) must be smaller than rate_limit.base_delay_ms ({})",
                self.rate_limit.max_jitter_ms, self.rate_limit.base_delay_ms
            )));
        }
        if self.geocoder.api_key_env.trim().is_empty() {
            return Err(AdiError::Config("geocoder.api_key_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// Geocoding API key from the configured environment variable.
    pub fn geocoder_api_key(&self) -> Result<String> {
        let key = std::env::var(&self.geocoder.api_key_env)?;
        if key.trim().is_empty() {
            return Err(AdiError::Config(format!("{} is empty", self.geocoder.api_key_env)));
        }
        Ok(key)
    }
}
