//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};
    use tracing::debug;

    /// Shows the bot's gateway latency.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        let latency = ctx.ping().await;
        debug!(latency_ms = latency.as_millis(), "Ping");
        ctx.say(format!("📡 My latency is **{}ms**", latency.as_millis()))
            .await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Help**\n\
        Here is a summary of all available commands.\n\n\
        **Weapons**\n\
        • `/weapons <category>` - Lists every base weapon of a category.\n\
        • `/specials <category> <weapon>` - Browses the special variants of a weapon.\n\n\
        **Inventory**\n\
        • `/register` - Creates your inventory.\n\
        • `/inventory` - Shows your items.\n\
        • `/unregister` - Deletes your inventory.\n\n\
        **Utility**\n\
        • `/ping` - Shows the bot's latency.\n\
        • `/help` - Shows this help message.\n\n\
        Use the buttons under a result to turn its pages.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
