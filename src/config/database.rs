//! Database location settings.
//!
//! Each database the bot uses is described by its file, an optional schema
//! script applied on first creation and an optional backup directory.

use serde::Deserialize;
use std::path::PathBuf;

/// Locations for one `SQLite` database
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// The database file
    pub file: PathBuf,
    /// Schema script run when the file is first created
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// Directory receiving `*.bak` copies
    #[serde(default)]
    pub backups: Option<PathBuf>,
}
