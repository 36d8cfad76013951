//! Repository factory for dependency injection.
//!
//! This module builds the backend selected by configuration and hands it out
//! as a shared [`CalendarRepository`] trait object.

use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info};

use super::config::{ApiConfig, ConfigError, MockOptions};
use super::repo_config::BookingConfig;
use super::repositories::MockRepository;
#[cfg(feature = "http-repo")]
use super::repositories::HttpRepository;
use super::repository::CalendarRepository;
use crate::error::{AppError, AppResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Built-in dataset with simulated latency
    Mock,
    /// Remote backend over HTTP
    Http,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("mock", "local", "http", "remote").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "local" => Ok(Self::Mock),
            "http" | "remote" => Ok(Self::Http),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// Reads `BOOKING_USE_MOCK_API`; anything other than `false` selects the
    /// mock.
    ///
    /// # Errors
    /// Returns an error if any `BOOKING_API_*` variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_api_config(&ApiConfig::from_env()?))
    }

    /// Same as [`RepositoryType::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::from_api_config(&ApiConfig::from_lookup(lookup)?))
    }

    pub fn from_api_config(config: &ApiConfig) -> Self {
        if config.use_mock {
            Self::Mock
        } else {
            Self::Http
        }
    }
}

/// Factory for creating repository instances.
///
/// # Example
/// ```no_run
/// use booking_core::db::{ApiConfig, RepositoryFactory, RepositoryType};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mock = RepositoryFactory::create_mock();
///
///     let config = ApiConfig::from_env()?;
///     let repo = RepositoryFactory::create(RepositoryType::Http, Some(&config), None)?;
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `config` - API configuration (required for HTTP)
    /// * `mock` - Mock behavior (defaults when `None`)
    pub fn create(
        repo_type: RepositoryType,
        config: Option<&ApiConfig>,
        mock: Option<MockOptions>,
    ) -> AppResult<Arc<dyn CalendarRepository>> {
        match repo_type {
            RepositoryType::Mock => {
                info!("Using mock booking repository");
                Ok(Arc::new(MockRepository::with_options(mock.unwrap_or_default())))
            }
            RepositoryType::Http => {
                let config = config.ok_or_else(|| {
                    AppError::unknown("HTTP repository requires ApiConfig")
                })?;
                Self::create_http(config)
            }
        }
    }

    /// Create the mock repository with default options.
    pub fn create_mock() -> Arc<dyn CalendarRepository> {
        Arc::new(MockRepository::new())
    }

    #[cfg(feature = "http-repo")]
    pub fn create_http(config: &ApiConfig) -> AppResult<Arc<dyn CalendarRepository>> {
        info!("Using HTTP booking repository at {}", config.base_url);
        Ok(Arc::new(HttpRepository::new(config)?))
    }

    #[cfg(not(feature = "http-repo"))]
    pub fn create_http(_config: &ApiConfig) -> AppResult<Arc<dyn CalendarRepository>> {
        Err(AppError::unknown(
            "HTTP repository support is disabled; enable the `http-repo` feature",
        ))
    }

    /// Create repository from environment configuration.
    pub fn from_env() -> Result<Arc<dyn CalendarRepository>, anyhow::Error> {
        let config = ApiConfig::from_env()?;
        let repo_type = RepositoryType::from_api_config(&config);
        Ok(Self::create(repo_type, Some(&config), None)?)
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use booking_core::db::{RepositoryBuilder, RepositoryType};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Mock)
///         .simulate_latency(false)
///         .build()?;
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    config: Option<ApiConfig>,
    mock: MockOptions,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    ///
    /// Defaults to the mock repository.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Mock,
            config: None,
            mock: MockOptions::default(),
        }
    }

    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the API configuration. Also selects the repository type from it.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.repo_type = RepositoryType::from_api_config(&config);
        self.config = Some(config);
        self
    }

    pub fn mock_options(mut self, mock: MockOptions) -> Self {
        self.mock = mock;
        self
    }

    pub fn simulate_latency(mut self, enabled: bool) -> Self {
        self.mock.simulate_latency = enabled;
        self
    }

    pub fn reschedule_success_rate(mut self, rate: f64) -> Self {
        self.mock.reschedule_success_rate = rate;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        Ok(self.config(ApiConfig::from_env()?))
    }

    /// Load configuration from a parsed `booking.toml`.
    pub fn from_config_file(self, file: &BookingConfig) -> Self {
        self.config(file.api_config()).mock_options(file.mock_options())
    }

    /// Load `booking.toml` from the standard locations, falling back to
    /// environment variables only when no file exists.
    ///
    /// # Errors
    /// A file that exists but cannot be read, parsed or validated is an
    /// error, as is an invalid environment variable.
    pub fn from_default_sources(self) -> Result<Self, ConfigError> {
        self.from_file_or_env(BookingConfig::from_default_location(), ApiConfig::from_env)
    }

    fn from_file_or_env<F>(
        self,
        file: Result<BookingConfig, ConfigError>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnOnce() -> Result<ApiConfig, ConfigError>,
    {
        match file {
            Ok(file) => Ok(self.from_config_file(&file)),
            Err(ConfigError::NotFound(name)) => {
                debug!("No {} found, using environment configuration", name);
                Ok(self.config(env()?))
            }
            Err(err) => Err(err),
        }
    }

    pub fn build(self) -> AppResult<Arc<dyn CalendarRepository>> {
        self.mock
            .validate()
            .map_err(|e| AppError::unknown(e.to_string()))?;
        RepositoryFactory::create(self.repo_type, self.config.as_ref(), Some(self.mock))
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("mock".parse::<RepositoryType>().unwrap(), RepositoryType::Mock);
        assert_eq!("Local".parse::<RepositoryType>().unwrap(), RepositoryType::Mock);
        assert_eq!("http".parse::<RepositoryType>().unwrap(), RepositoryType::Http);
        assert_eq!("REMOTE".parse::<RepositoryType>().unwrap(), RepositoryType::Http);
        assert!("invalid".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_type_follows_config() {
        let mut config = ApiConfig::default();
        assert_eq!(RepositoryType::from_api_config(&config), RepositoryType::Mock);
        config.use_mock = false;
        assert_eq!(RepositoryType::from_api_config(&config), RepositoryType::Http);
    }

    #[tokio::test]
    async fn test_builder_mock_repository() {
        let repo = RepositoryBuilder::new()
            .simulate_latency(false)
            .build()
            .unwrap();

        let stations = repo.get_all_stations().await.unwrap();
        assert_eq!(stations.len(), 7);
    }

    #[test]
    fn test_http_requires_config() {
        let result = RepositoryFactory::create(RepositoryType::Http, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_repository_type_from_lookup() {
        let http = RepositoryType::from_lookup(|key| match key {
            "BOOKING_USE_MOCK_API" => Some("false".to_string()),
            _ => None,
        });
        assert_eq!(http.unwrap(), RepositoryType::Http);

        assert_eq!(RepositoryType::from_lookup(|_| None).unwrap(), RepositoryType::Mock);
    }

    #[test]
    fn test_repository_type_rejects_bad_timeout() {
        let result = RepositoryType::from_lookup(|key| match key {
            "BOOKING_API_TIMEOUT_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let builder = RepositoryBuilder::new()
            .from_file_or_env(
                Err(ConfigError::NotFound("booking.toml".to_string())),
                || {
                    Ok(ApiConfig {
                        use_mock: false,
                        ..ApiConfig::default()
                    })
                },
            )
            .unwrap();
        assert_eq!(builder.repo_type, RepositoryType::Http);
    }

    #[test]
    fn test_malformed_file_is_not_skipped() {
        let mut env_used = false;
        let result = RepositoryBuilder::new().from_file_or_env(
            BookingConfig::from_toml_str("[api\nbase_url = "),
            || {
                env_used = true;
                Ok(ApiConfig::default())
            },
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        assert!(!env_used);

        let invalid = BookingConfig::from_toml_str("[api]\ntimeout_ms = 0\n");
        let result = RepositoryBuilder::new().from_file_or_env(invalid, || Ok(ApiConfig::default()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_env_error_propagates_when_no_file() {
        let result = RepositoryBuilder::new().from_file_or_env(
            Err(ConfigError::NotFound("booking.toml".to_string())),
            || {
                Err(ConfigError::InvalidValue {
                    key: "BOOKING_API_TIMEOUT_MS".to_string(),
                    value: "soon".to_string(),
                })
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_bad_rate() {
        let result = RepositoryBuilder::new().reschedule_success_rate(-0.5).build();
        assert!(result.is_err());
    }
}
