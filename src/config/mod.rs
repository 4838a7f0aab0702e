//! Configuration loading from `config.toml`.
//!
//! Secrets (bot token, test guild id) are read from the environment; everything
//! else lives in the TOML file so it can be versioned alongside the schemas.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Bot behaviour settings and testing-mode checks
pub mod bot;
/// Database file, schema and backup locations
pub mod database;
/// Tracing subscriber setup
pub mod logging;

pub use bot::BotConfig;
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Game items database (weapons and their special variants)
    pub items_database: DatabaseConfig,
    /// Users database (inventories)
    pub users_database: DatabaseConfig,
    /// Discord-facing settings
    #[serde(default)]
    pub bot: BotConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid or
/// required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [items_database]
            file = "databases/items.db"
            schema = "databases/schemas/items_db_schema.sql"
            backups = "databases/backups"

            [users_database]
            file = "databases/users.db"

            [bot]
            testing = true
            paginator_timeout_secs = 120
            statuses = ["slash commands!"]
            image_base_url = "https://example.com/"

            [logging]
            directory = "logs"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.items_database.file, PathBuf::from("databases/items.db"));
        assert!(config.items_database.schema.is_some());
        assert!(config.users_database.schema.is_none());
        assert!(config.users_database.backups.is_none());
        assert!(config.bot.testing);
        assert_eq!(config.bot.paginator_timeout_secs, 120);
        assert_eq!(config.bot.status_interval_secs, 10);
        assert_eq!(config.bot.statuses, vec!["slash commands!".to_string()]);
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_bot_and_logging_sections_are_optional() {
        let toml_str = r#"
            [items_database]
            file = "items.db"

            [users_database]
            file = "users.db"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.bot.testing);
        assert_eq!(config.bot.paginator_timeout_secs, 60);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_repository_config_parses() {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml")).unwrap();
        assert_eq!(config.items_database.file, PathBuf::from("databases/items.db"));
    }
}
