//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Prefix for structured environment overrides, e.g. `GROUPS_API__SERVER__PORT`
pub const ENV_PREFIX: &str = "GROUPS_API";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub vk: VkConfig,
    pub telegram: TelegramConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

/// VK API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VkConfig {
    pub api_url: String,
    pub api_version: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub posts_to_analyze: u32,
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: Option<String>,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from defaults, `config.toml` and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load("config")
    }

    /// Same as [`Settings::new`] with an explicit, optional config file
    pub fn load(file: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.min_connections", i64::from(defaults.database.min_connections))?
            .set_default("database.acquire_timeout_seconds", defaults.database.acquire_timeout_seconds as i64)?
            .set_default("database.run_migrations", defaults.database.run_migrations)?
            .set_default("vk.api_url", defaults.vk.api_url)?
            .set_default("vk.api_version", defaults.vk.api_version)?
            .set_default("vk.timeout_seconds", defaults.vk.timeout_seconds as i64)?
            .set_default("vk.posts_to_analyze", i64::from(defaults.vk.posts_to_analyze))?
            .set_default("telegram.api_url", defaults.telegram.api_url)?
            .set_default("telegram.timeout_seconds", defaults.telegram.timeout_seconds as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            // Plain deployment variables win over everything else
            .set_override_option("database.url", non_empty_env("DATABASE_URL"))?
            .set_override_option("vk.token", non_empty_env("VK_API_TOKEN"))?
            .set_override_option("telegram.bot_token", non_empty_env("TELEGRAM_BOT_TOKEN"))?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DirectoryError> {
        super::validation::validate_settings(self)
    }
}

impl VkConfig {
    /// Configured token, treating an empty value as absent
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

impl TelegramConfig {
    /// Configured bot token, treating an empty value as absent
    pub fn bot_token(&self) -> Option<&str> {
        self.bot_token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/group_reviews".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                run_migrations: true,
            },
            vk: VkConfig {
                api_url: "https://api.vk.com/method".to_string(),
                api_version: "5.131".to_string(),
                token: None,
                timeout_seconds: 10,
                posts_to_analyze: 10,
            },
            telegram: TelegramConfig {
                api_url: "https://api.telegram.org".to_string(),
                bot_token: None,
                timeout_seconds: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tokens_are_treated_as_absent() {
        let mut settings = Settings::default();
        settings.vk.token = Some("   ".to_string());
        settings.telegram.bot_token = Some(String::new());

        assert_eq!(settings.vk.token(), None);
        assert_eq!(settings.telegram.bot_token(), None);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let mut settings = Settings::default();
        settings.vk.token = Some(" vk-token ".to_string());
        settings.telegram.bot_token = Some("123:abc".to_string());

        assert_eq!(settings.vk.token(), Some("vk-token"));
        assert_eq!(settings.telegram.bot_token(), Some("123:abc"));
    }

    #[test]
    fn test_default_timeouts() {
        let settings = Settings::default();
        assert_eq!(settings.vk.timeout_seconds, 10);
        assert_eq!(settings.telegram.timeout_seconds, 10);
        assert_eq!(settings.vk.posts_to_analyze, 10);
    }
}
