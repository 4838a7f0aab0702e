//! Unified error types for the bot.
//!
//! Core modules raise these typed conditions and never build user-facing text;
//! the command boundary in [`crate::bot::handlers::errors`] decides what the
//! user sees.

use thiserror::Error;

/// Every failure the crate can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or inconsistent configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong and how to fix it
        message: String,
    },

    /// Failure reported by the database engine (connect, query, commit, close)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A query was attempted while the store had no live connection
    #[error("Not connected to the database '{path}'")]
    NotConnected {
        /// Database file the store manages
        path: String,
    },

    /// Table missing from the live schema catalog
    #[error("Table '{table}' not found in the database.")]
    TableNotFound {
        /// Table name as supplied by the caller
        table: String,
    },

    /// Column missing from an existing table
    #[error("Column '{column}' not found in table '{table}'.")]
    ColumnNotFound {
        /// Table that was searched
        table: String,
        /// Column name as supplied by the caller
        column: String,
    },

    /// Lookup key matched nothing
    #[error("Cannot find '{item}'.")]
    ItemNotFound {
        /// The key the user searched for
        item: String,
    },

    /// No inventory row for the user
    #[error("User {user_id} is not registered.")]
    UserNotFound {
        /// Discord user id
        user_id: i64,
    },

    /// Caller supplied unusable arguments; rejected before any query ran
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem
        message: String,
    },

    /// A pagination session was started without any page
    #[error("Cannot paginate an empty set of pages")]
    EmptyPages,

    /// RGB channels outside `0..=255`
    #[error("RGB values must be between 0 and 255 (invalid values: {values:?})")]
    InvalidColor {
        /// The offending channel values
        values: Vec<i32>,
    },

    /// Filesystem failure (schema read, backup copy, log file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether this is a "not found" condition the user should see verbatim,
    /// as opposed to an internal failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound { .. }
                | Self::ColumnNotFound { .. }
                | Self::ItemNotFound { .. }
                | Self::UserNotFound { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(
            Error::TableNotFound {
                table: "nope".to_string()
            }
            .is_not_found()
        );
        assert!(
            Error::ItemNotFound {
                item: "Spoon".to_string()
            }
            .is_not_found()
        );
        assert!(Error::UserNotFound { user_id: 1 }.is_not_found());
        assert!(!Error::EmptyPages.is_not_found());
        assert!(
            !Error::InvalidInput {
                message: "x".to_string()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_item_not_found_message() {
        let err = Error::ItemNotFound {
            item: "Spoon".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot find 'Spoon'.");
    }

    #[test]
    fn test_source_errors_convert() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(matches!(err, Error::Io(_)));

        let err: Error = std::env::VarError::NotPresent.into();
        assert!(matches!(err, Error::EnvVar(_)));

        let err: Error = poise::serenity_prelude::Error::Other("gateway closed").into();
        assert!(matches!(err, Error::Framework(_)));
    }
}
