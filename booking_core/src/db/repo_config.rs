//! Configuration file support.
//!
//! This module reads backend settings from a `booking.toml` file:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000/v1"
//! timeout_ms = 5000
//! use_mock = false
//!
//! [mock]
//! reschedule_success_rate = 0.9
//! simulate_latency = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::config::{
    normalize_base_url, ApiConfig, ConfigError, MockOptions, DEFAULT_BASE_URL,
    DEFAULT_RESCHEDULE_SUCCESS_RATE, DEFAULT_TIMEOUT_MS,
};
use super::factory::RepositoryType;

pub const CONFIG_FILE_NAME: &str = "booking.toml";

/// Configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub mock: MockSettings,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_true")]
    pub use_mock: bool,
}

/// `[mock]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSettings {
    #[serde(default = "default_success_rate")]
    pub reschedule_success_rate: f64,
    #[serde(default = "default_true")]
    pub simulate_latency: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_success_rate() -> f64 {
    DEFAULT_RESCHEDULE_SUCCESS_RATE
}

fn default_true() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            use_mock: true,
        }
    }
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            reschedule_success_rate: default_success_rate(),
            simulate_latency: true,
        }
    }
}

impl BookingConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(BookingConfig)` if the file parses and validates
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BookingConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `booking.toml` in:
    /// 1. Current directory
    /// 2. `booking_core/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("booking_core").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound(CONFIG_FILE_NAME.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_ms must be greater than zero".to_string(),
            ));
        }
        self.api_config().validate()?;
        self.mock_options().validate()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: normalize_base_url(&self.api.base_url),
            timeout: Duration::from_millis(self.api.timeout_ms),
            use_mock: self.api.use_mock,
        }
    }

    pub fn mock_options(&self) -> MockOptions {
        MockOptions {
            reschedule_success_rate: self.mock.reschedule_success_rate,
            simulate_latency: self.mock.simulate_latency,
        }
    }

    pub fn repository_type(&self) -> RepositoryType {
        if self.api.use_mock {
            RepositoryType::Mock
        } else {
            RepositoryType::Http
        }
    }
}
