//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/default.toml, config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// User directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Number of buckets in the username hash index (default: 100)
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            bucket_count: default_bucket_count(),
        }
    }
}

fn default_bucket_count() -> usize {
    100
}

/// Signup and login rules
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length accepted at signup (default: 6)
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Consecutive wrong passwords before a login is locked out (default: 3)
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
            max_login_attempts: default_max_login_attempts(),
        }
    }
}

fn default_min_password_len() -> usize {
    6
}

fn default_max_login_attempts() -> u32 {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error (default: warn)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (MINIGRAM__*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            .set_default("directory.bucket_count", 100)?
            .set_default("auth.min_password_len", 6)?
            .set_default("auth.max_login_attempts", 3)?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("MINIGRAM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject values the core cannot operate with
    pub fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.directory.bucket_count == 0 {
            return Err(crate::error::AppError::Config(
                "directory.bucket_count must be greater than 0".to_string(),
            ));
        }

        if self.auth.max_login_attempts == 0 {
            return Err(crate::error::AppError::Config(
                "auth.max_login_attempts must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(crate::error::AppError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}
