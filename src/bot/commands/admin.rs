//! Owner-only database maintenance: take and restore backups.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::store::RecordStore,
        errors::Result,
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::info;

    /// Databases the bot manages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum DatabaseChoice {
        Items,
        Users,
    }

    fn store_for(ctx: Context<'_>, database: DatabaseChoice) -> Arc<Mutex<RecordStore>> {
        match database {
            DatabaseChoice::Items => Arc::clone(&ctx.data().items),
            DatabaseChoice::Users => Arc::clone(&ctx.data().users),
        }
    }

    /// Database maintenance.
    #[poise::command(
        slash_command,
        owners_only,
        ephemeral,
        subcommands("backup", "recover")
    )]
    pub async fn database(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Copy a database file into its backup directory.
    #[poise::command(slash_command, owners_only, ephemeral)]
    pub async fn backup(
        ctx: Context<'_>,
        #[description = "Database to back up"] database: DatabaseChoice,
    ) -> Result<()> {
        let store = store_for(ctx, database);
        let path = store.lock().await.backup().await?;
        info!("{database:?} database backed up to {}", path.display());
        ctx.say(format!("💾 Backup written to `{}`.", path.display()))
            .await?;
        Ok(())
    }

    /// Restore a database file from its newest backup.
    #[poise::command(slash_command, owners_only, ephemeral)]
    pub async fn recover(
        ctx: Context<'_>,
        #[description = "Database to restore"] database: DatabaseChoice,
    ) -> Result<()> {
        let store = store_for(ctx, database);
        let restored = store.lock().await.recover().await?;
        match restored {
            Some(path) => {
                ctx.say(format!("♻️ Restored from `{}`.", path.display()))
                    .await?;
            }
            None => {
                ctx.say("No backup available to restore.").await?;
            }
        }
        Ok(())
    }
}

pub use inner::*;
