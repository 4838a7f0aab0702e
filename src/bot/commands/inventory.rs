//! Player inventory commands - register, unregister and show items.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::{format::title_case, inventory},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Item columns shown by `/inventory`, in display order.
    const ITEMS: &[&str] = &["gold", "potions", "scrolls"];

    /// Discord snowflakes fit in 63 bits; SQLite integers are signed.
    fn user_key(ctx: Context<'_>) -> Result<i64> {
        let id = ctx.author().id.get();
        i64::try_from(id).map_err(|_| Error::InvalidInput {
            message: format!("User id {id} is out of range"),
        })
    }

    /// Create your inventory.
    #[poise::command(slash_command)]
    pub async fn register(ctx: Context<'_>) -> Result<()> {
        let user_id = user_key(ctx)?;
        let added = {
            let store = ctx.data().users.lock().await;
            inventory::add_user(&store, user_id).await?
        };

        if added {
            ctx.say("✅ You're registered! Use `/inventory` to see your items.")
                .await?;
        } else {
            ctx.say("⚠️ You're already registered.").await?;
        }
        Ok(())
    }

    /// Delete your inventory.
    #[poise::command(slash_command)]
    pub async fn unregister(ctx: Context<'_>) -> Result<()> {
        let user_id = user_key(ctx)?;
        {
            let store = ctx.data().users.lock().await;
            inventory::remove_user(&store, user_id).await?;
        }
        ctx.say("🗑️ Your inventory has been deleted.").await?;
        Ok(())
    }

    /// Show your items.
    #[poise::command(slash_command)]
    pub async fn inventory(ctx: Context<'_>) -> Result<()> {
        let user_id = user_key(ctx)?;
        let row = {
            let store = ctx.data().users.lock().await;
            inventory::fetch_items(&store, user_id, ITEMS).await?
        };

        let fields = ITEMS.iter().map(|item| {
            let amount = row
                .get(*item)
                .and_then(serde_json::Value::as_i64)
                .unwrap_or_default();
            (title_case(item), amount.to_string(), true)
        });
        let embed = serenity::CreateEmbed::new()
            .title(format!("{}'s inventory", ctx.author().name))
            .fields(fields)
            .color(ctx.data().embed_color);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

pub use inner::*;
