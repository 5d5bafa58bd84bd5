//! Configuration validation module
//! 
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DirectoryError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_vk_config(&settings.vk)?;
    validate_telegram_config(&settings.telegram)?;
    validate_logging_config(&settings.logging)?;
    
    Ok(())
}

/// Validate HTTP listener configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(DirectoryError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(DirectoryError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DirectoryError::Config(
            "Database URL is required".to_string()
        ));
    }
    
    if config.max_connections == 0 {
        return Err(DirectoryError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }
    
    if config.min_connections > config.max_connections {
        return Err(DirectoryError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(DirectoryError::Config(
            "Database acquire timeout must be greater than 0".to_string()
        ));
    }
    
    Ok(())
}

/// Validate VK API configuration
///
/// The token itself is optional: without it analytics degrade to "unavailable".
fn validate_vk_config(config: &super::VkConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(DirectoryError::Config(
            "VK API URL is required".to_string()
        ));
    }

    if config.api_version.is_empty() {
        return Err(DirectoryError::Config(
            "VK API version is required".to_string()
        ));
    }
    
    if config.timeout_seconds == 0 {
        return Err(DirectoryError::Config(
            "VK timeout must be greater than 0".to_string()
        ));
    }

    if config.posts_to_analyze == 0 || config.posts_to_analyze > 100 {
        return Err(DirectoryError::Config(
            "VK posts_to_analyze must be between 1 and 100".to_string()
        ));
    }
    
    Ok(())
}

/// Validate Telegram Bot API configuration
fn validate_telegram_config(config: &super::TelegramConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(DirectoryError::Config(
            "Telegram API URL is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(DirectoryError::Config(
            "Telegram timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DirectoryError::Config(
            "Log level is required".to_string()
        ));
    }
    
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DirectoryError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_missing_tokens_are_allowed() {
        let mut settings = Settings::default();
        settings.vk.token = None;
        settings.telegram.bot_token = None;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_min_connections_above_max() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert_matches!(validate_settings(&settings), Err(DirectoryError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_database_url() {
        let mut settings = Settings::default();
        settings.database.url.clear();
        assert_matches!(validate_settings(&settings), Err(DirectoryError::Config(msg)) if msg.contains("Database URL"));
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut settings = Settings::default();
        settings.vk.timeout_seconds = 0;
        assert_matches!(validate_settings(&settings), Err(DirectoryError::Config(_)));

        let mut settings = Settings::default();
        settings.telegram.timeout_seconds = 0;
        assert_matches!(validate_settings(&settings), Err(DirectoryError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(DirectoryError::Config(msg)) if msg.contains("verbose"));
    }
}
