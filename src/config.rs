//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `TELEGRAM_BOT_TOKEN`.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::assets::AssetCatalog;
use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Chains and tokens the trade wizard offers.
    #[serde(default)]
    pub assets: AssetCatalog,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "swapdesk.sqlite".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Telegram connection configuration.
/// The bot token is loaded from `TELEGRAM_BOT_TOKEN` at runtime (never from
/// the config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.telegram.bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok();

        config.validate()?;

        Ok(config)
    }

    /// Build a config without a file, taking defaults everywhere and the bot
    /// token from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.telegram.bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok();
        config
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField { field: "database.url" }.into());
        }
        if self.assets.chains.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "assets.chains",
                reason: "at least one chain is required".to_string(),
            }
            .into());
        }
        if self.assets.tokens.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "assets.tokens",
                reason: "at least one token is required".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            database: DatabaseConfig::default(),
            telegram: TelegramConfig::default(),
            assets: AssetCatalog::default(),
        }
    }
}
