//! Configuration management for the City Explorer service
//!
//! Settings come from an optional TOML file layered under environment
//! variables. The plain variable names (`PORT`, `DATABASE_URL`,
//! `LOCATION_KEY`, ...) map onto top-level keys; nested sections use a
//! double underscore, e.g. `SERVICES__TMDB_URL` or `LOGGING__LEVEL`.

use crate::ExplorerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection string; the cache is kept in memory when unset
    #[serde(default)]
    pub database_url: Option<String>,
    /// LocationIQ geocoding key
    #[serde(default)]
    pub location_key: String,
    /// Weatherbit key
    #[serde(default)]
    pub weather_key: String,
    /// National Park Service key
    #[serde(default)]
    pub park_key: String,
    /// TMDB key
    #[serde(default)]
    pub movie_api_key: String,
    /// Yelp Fusion bearer token
    #[serde(default)]
    pub yelp_api_key: String,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_locationiq_url")]
    pub locationiq_url: String,
    #[serde(default = "default_weatherbit_url")]
    pub weatherbit_url: String,
    #[serde(default = "default_nps_url")]
    pub nps_url: String,
    #[serde(default = "default_tmdb_url")]
    pub tmdb_url: String,
    /// Prefix prepended to TMDB poster paths
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,
    #[serde(default = "default_yelp_url")]
    pub yelp_url: String,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    #[serde(default = "default_use_proxy")]
    pub use_proxy: bool,
}

/// Location cache database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_port() -> u16 {
    3030
}

fn default_locationiq_url() -> String {
    "https://eu1.locationiq.com/v1".to_string()
}

fn default_weatherbit_url() -> String {
    "https://api.weatherbit.io/v2.0".to_string()
}

fn default_nps_url() -> String {
    "https://developer.nps.gov/api/v1".to_string()
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_yelp_url() -> String {
    "https://api.yelp.com/v3".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("CityExplorer/{}", crate::VERSION)
}

fn default_use_proxy() -> bool {
    true
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            locationiq_url: default_locationiq_url(),
            weatherbit_url: default_weatherbit_url(),
            nps_url: default_nps_url(),
            tmdb_url: default_tmdb_url(),
            tmdb_image_url: default_tmdb_image_url(),
            yelp_url: default_yelp_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
            use_proxy: default_use_proxy(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: None,
            location_key: String::new(),
            weather_key: String::new(),
            park_key: String::new(),
            movie_api_key: String::new(),
            yelp_api_key: String::new(),
            services: ServicesConfig::default(),
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from the given TOML file (default `config.toml`,
    /// skipped when absent) and the environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::default()
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ExplorerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.port == 0 {
            self.port = default_port();
        }
        if self
            .database_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.database_url = None;
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.database.max_connections == 0 {
            self.database.max_connections = default_max_connections();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Every upstream needs its key
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("LOCATION_KEY", &self.location_key),
            ("WEATHER_KEY", &self.weather_key),
            ("PARK_KEY", &self.park_key),
            ("MOVIE_API_KEY", &self.movie_api_key),
            ("YELP_API_KEY", &self.yelp_api_key),
        ];

        let missing: Vec<&str> = keys
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ExplorerError::config(format!(
                "Missing API keys: {}",
                missing.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(
                ExplorerError::config("HTTP timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.database.max_connections > 100 {
            return Err(ExplorerError::config(
                "Database max connections cannot exceed 100",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ExplorerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("services.locationiq_url", &self.services.locationiq_url),
            ("services.weatherbit_url", &self.services.weatherbit_url),
            ("services.nps_url", &self.services.nps_url),
            ("services.tmdb_url", &self.services.tmdb_url),
            ("services.tmdb_image_url", &self.services.tmdb_image_url),
            ("services.yelp_url", &self.services.yelp_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ExplorerError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> ExplorerConfig {
        ExplorerConfig {
            location_key: "loc".to_string(),
            weather_key: "wea".to_string(),
            park_key: "park".to_string(),
            movie_api_key: "movie".to_string(),
            yelp_api_key: "yelp".to_string(),
            ..ExplorerConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(config.port, 3030);
        assert!(config.database_url.is_none());
        assert_eq!(config.services.tmdb_image_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation_missing_api_keys() {
        let mut config = config_with_keys();
        config.park_key = String::new();
        config.yelp_api_key = "  ".to_string();
        let err = config.validate_api_keys().unwrap_err().to_string();
        assert!(err.contains("PARK_KEY"));
        assert!(err.contains("YELP_API_KEY"));
        assert!(!err.contains("WEATHER_KEY"));
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(config_with_keys().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = config_with_keys();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = config_with_keys();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = config_with_keys();
        config.services.yelp_url = "api.yelp.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("services.yelp_url"));
    }

    #[test]
    fn test_apply_defaults_blank_database_url() {
        let mut config = config_with_keys();
        config.database_url = Some(" ".to_string());
        config.http.timeout_seconds = 0;
        config.apply_defaults();
        assert!(config.database_url.is_none());
        assert_eq!(config.http.timeout_seconds, 30);
    }
}
