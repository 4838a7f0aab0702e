//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface: slash commands, the paginator
//! host adapter, the error boundary and the presence loop.

/// Discord command implementations (items, inventory, general, admin)
pub mod commands;
/// Discord interaction handlers (pagination, autocomplete, errors, presence)
pub mod handlers;

use crate::{
    config::BotConfig,
    core::{format::rgb_to_hex, store::RecordStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Shared data available to all bot commands.
///
/// Each store is behind its own mutex: a store runs one query at a time and
/// commands lock it only for the duration of their lookups.
pub struct BotData {
    /// Game items database
    pub items: Arc<Mutex<RecordStore>>,
    /// Users database
    pub users: Arc<Mutex<RecordStore>>,
    /// Discord-facing settings
    pub settings: BotConfig,
    /// Colour of regular embeds
    pub embed_color: u32,
}

impl BotData {
    /// Creates the shared bot context, validating the configured embed colour.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColor`] when `settings.embed_color` is out of range.
    pub fn new(
        items: Arc<Mutex<RecordStore>>,
        users: Arc<Mutex<RecordStore>>,
        settings: BotConfig,
    ) -> Result<Self> {
        let embed_color = rgb_to_hex(settings.embed_color)?;
        Ok(Self {
            items,
            users,
            settings,
            embed_color,
        })
    }
}

/// Every registered command.
#[must_use]
pub fn commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::specials(),
        commands::weapons(),
        commands::register(),
        commands::unregister(),
        commands::inventory(),
        commands::database(),
    ]
}

/// Connects to Discord and runs until the gateway shuts down or Ctrl-C is
/// received. Commands are registered in `guild` when given, globally otherwise.
///
/// # Errors
/// Returns framework errors from building or running the client.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData, guild: Option<u64>) -> Result<()> {
    let statuses = data.settings.statuses.clone();
    let status_interval = data.settings.status_interval();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands(),
            on_error: |error| Box::pin(handlers::errors::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                if let Some(guild_id) = guild {
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        serenity::GuildId::new(guild_id),
                    )
                    .await?;
                    tracing::warn!("The bot is in testing mode; commands registered in guild {guild_id}.");
                } else {
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Registered commands globally.");
                }

                tokio::spawn(handlers::presence::rotate_statuses(
                    ctx.clone(),
                    statuses,
                    status_interval,
                ));
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("The bot has been turned off.");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}
