use dotenvy::dotenv;
use rpg_discord_bot::{
    bot::{self, BotData},
    config::{self, logging},
    core::store::RecordStore,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, info_span};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional, variables can be set externally
    let dotenv_loaded = dotenv().is_ok();

    let config = config::load_default_config()?;
    // Flushes the log file when dropped at the end of main
    let _log_guard = logging::init_tracing(&config.logging)?;
    info!(dotenv_loaded, "Configuration loaded.");

    let test_guild = env::var("TEST_GUILD").ok();
    let guild = config.bot.registration_guild(test_guild.as_deref())?;

    let mut items = RecordStore::from_config(&config.items_database)
        .with_span(info_span!("items_db"));
    items
        .connect()
        .await
        .inspect_err(|e| error!("Failed to open the items database: {e}"))?;

    let mut users = RecordStore::from_config(&config.users_database)
        .with_span(info_span!("users_db"));
    users
        .connect()
        .await
        .inspect_err(|e| error!("Failed to open the users database: {e}"))?;

    let items = Arc::new(Mutex::new(items));
    let users = Arc::new(Mutex::new(users));
    let data = BotData::new(Arc::clone(&items), Arc::clone(&users), config.bot)?;

    // Loaded directly before use, never stored in the config
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    let outcome = bot::run_bot(token, data, guild).await;

    items.lock().await.disconnect().await?;
    users.lock().await.disconnect().await?;
    info!("Databases closed.");
    outcome
}
