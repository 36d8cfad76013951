//! API configuration and environment variable handling.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://605c94c36d85de00174f0f76.mockapi.io/roadsurfer/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RESCHEDULE_SUCCESS_RATE: f64 = 0.9;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {0}")]
    Io(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("No {0} found in standard locations")]
    NotFound(String),
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Deadline for each HTTP request
    pub timeout: Duration,
    /// Serve data from the built-in mock instead of HTTP
    pub use_mock: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            use_mock: true,
        }
    }
}

impl ApiConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `BOOKING_API_BASE_URL` (optional): backend base URL
    /// - `BOOKING_API_TIMEOUT_MS` (optional, default: 10000): request timeout
    /// - `BOOKING_USE_MOCK_API` (optional): mock is used unless this is `false`
    ///
    /// # Errors
    /// Returns an error if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BOOKING_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = match lookup("BOOKING_API_TIMEOUT_MS") {
            Some(raw) => parse_timeout("BOOKING_API_TIMEOUT_MS", &raw)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let use_mock = lookup("BOOKING_USE_MOCK_API")
            .map(|v| v.trim() != "false")
            .unwrap_or(true);

        let config = Self {
            base_url: normalize_base_url(&base_url),
            timeout: Duration::from_millis(timeout_ms),
            use_mock,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.use_mock
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Behavior knobs for the mock backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockOptions {
    /// Probability that a reschedule is accepted
    pub reschedule_success_rate: f64,
    /// Sleep for the fixed per-operation latency
    pub simulate_latency: bool,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            reschedule_success_rate: DEFAULT_RESCHEDULE_SUCCESS_RATE,
            simulate_latency: true,
        }
    }
}

impl MockOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reschedule_success_rate) {
            return Err(ConfigError::Validation(format!(
                "reschedule_success_rate must be within [0, 1], got {}",
                self.reschedule_success_rate
            )));
        }
        Ok(())
    }
}

pub(crate) fn parse_timeout(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert!(config.use_mock);
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("BOOKING_API_BASE_URL", "http://localhost:3000/api/"),
            ("BOOKING_API_TIMEOUT_MS", "2500"),
            ("BOOKING_USE_MOCK_API", "false"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert!(!config.use_mock);
    }

    #[test]
    fn test_mock_unless_exactly_false() {
        let config = ApiConfig::from_lookup(lookup(&[("BOOKING_USE_MOCK_API", "no")])).unwrap();
        assert!(config.use_mock);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ApiConfig::from_lookup(lookup(&[("BOOKING_API_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ApiConfig::from_lookup(lookup(&[("BOOKING_API_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_http_mode_requires_http_url() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("BOOKING_API_BASE_URL", "ftp://example.com"),
            ("BOOKING_USE_MOCK_API", "false"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_mock_options_validation() {
        assert!(MockOptions::default().validate().is_ok());
        let bad = MockOptions {
            reschedule_success_rate: 1.5,
            simulate_latency: false,
        };
        assert!(bad.validate().is_err());
    }
}
