//! Discord-facing settings and the testing-mode consistency check.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the bot layer
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BotConfig {
    /// Register commands in `TEST_GUILD` only
    pub testing: bool,
    /// Seconds a paginated message listens for button presses
    pub paginator_timeout_secs: u64,
    /// Seconds between presence status changes
    pub status_interval_secs: u64,
    /// Presence texts cycled as "Watching ..."
    pub statuses: Vec<String>,
    /// Prefix joined to item `image_path` values
    pub image_base_url: String,
    /// RGB colour of regular embeds
    pub embed_color: [i32; 3],
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            testing: false,
            paginator_timeout_secs: 60,
            status_interval_secs: 10,
            statuses: Vec::new(),
            image_base_url: String::new(),
            embed_color: [88, 101, 242],
        }
    }
}

impl BotConfig {
    /// How long a paginator stays interactive.
    #[must_use]
    pub const fn paginator_timeout(&self) -> Duration {
        Duration::from_secs(self.paginator_timeout_secs)
    }

    /// Delay between two presence updates.
    #[must_use]
    pub const fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    /// Resolves the guild used for command registration.
    ///
    /// Testing mode needs a guild, and a guild without testing mode is a
    /// leftover that would silently change registration scope; both are
    /// rejected.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when `testing` and `test_guild` disagree or
    /// the guild id is not a number.
    pub fn registration_guild(&self, test_guild: Option<&str>) -> Result<Option<u64>> {
        match (self.testing, test_guild) {
            (true, Some(raw)) => raw.trim().parse::<u64>().map(Some).map_err(|e| Error::Config {
                message: format!("TEST_GUILD '{raw}' is not a valid guild id: {e}"),
            }),
            (true, None) => Err(Error::Config {
                message: "Missing TEST_GUILD. Set testing = false or provide TEST_GUILD."
                    .to_string(),
            }),
            (false, Some(_)) => Err(Error::Config {
                message: "Unnecessary TEST_GUILD. Set testing = true or remove TEST_GUILD."
                    .to_string(),
            }),
            (false, None) => Ok(None),
        }
    }
}
