//! Command error boundary.
//!
//! Expected conditions (unknown items, tables, unregistered users, bad input)
//! are shown to the user as they are. Anything else is logged, reported to
//! the application owner by direct message with the full error attached, and
//! answered with a generic apology.

use crate::{
    bot::{BotData, Context},
    errors::{Error, Result},
};
use chrono::{DateTime, Local};
use poise::serenity_prelude as serenity;
use tracing::{error, warn};

/// Colour of error embeds.
pub const ERROR_COLOR: u32 = 0xFF_00_00;

/// Shown to users when a command fails unexpectedly.
pub const GENERIC_FAILURE: &str =
    "It seems like I've ran into a problem. I've already reported the issue to the developer.";

/// Poise `on_error` hook.
#[allow(clippy::panic)]
pub async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {error:?}"),
        poise::FrameworkError::Command { error, ctx, .. } => handle_command_error(ctx, error).await,
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

async fn handle_command_error(ctx: Context<'_>, error: Error) {
    let title = if let Some(message) = user_message(&error) {
        message
    } else {
        error!(
            command = %ctx.command().qualified_name,
            user = %ctx.author().name,
            "Unhandled exception: {error:?}"
        );
        if let Err(e) = report_to_owner(ctx, &error).await {
            error!("Failed to report the error to the owner: {e}");
        }
        GENERIC_FAILURE.to_string()
    };

    let embed = serenity::CreateEmbed::new().title(title).color(ERROR_COLOR);
    if let Err(e) = ctx.send(poise::CreateReply::default().embed(embed)).await {
        error!("Failed to send the error message: {e}");
    }
}

/// Text to show the user for an expected condition, `None` for internal
/// failures.
#[must_use]
pub fn user_message(error: &Error) -> Option<String> {
    match error {
        Error::InvalidInput { message } => Some(message.clone()),
        error if error.is_not_found() => Some(error.to_string()),
        _ => None,
    }
}

/// Summary of a failed invocation sent to the owner.
#[must_use]
pub fn incident_description(
    command: &str,
    user_name: &str,
    user_id: u64,
    at: DateTime<Local>,
) -> String {
    format!(
        "Command: **/{command}**\n\
         Used by: **[{user_name}](https://discord.com/users/{user_id})**\n\
         Date: **{}**\n\
         Time: **{}**",
        at.format("%d/%m/%Y"),
        at.format("%H:%M:%S")
    )
}

async fn report_to_owner(ctx: Context<'_>, error: &Error) -> Result<()> {
    let info = ctx.http().get_current_application_info().await?;
    let Some(owner) = info.owner else {
        warn!("The application has no owner to report to");
        return Ok(());
    };

    let author = ctx.author();
    let embed = serenity::CreateEmbed::new()
        .title("Unhandled exception")
        .description(incident_description(
            &ctx.command().qualified_name,
            &author.name,
            author.id.get(),
            Local::now(),
        ))
        .color(ERROR_COLOR);
    let traceback = serenity::CreateAttachment::bytes(format!("{error:#?}"), "traceback.txt");

    owner
        .direct_message(
            ctx.serenity_context(),
            serenity::CreateMessage::new().embed(embed).add_file(traceback),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_message_for_expected_conditions() {
        let error = Error::ItemNotFound {
            item: "Spoon".to_string(),
        };
        assert_eq!(user_message(&error).as_deref(), Some("Cannot find 'Spoon'."));

        let error = Error::InvalidInput {
            message: "Provide at least one item".to_string(),
        };
        assert_eq!(
            user_message(&error).as_deref(),
            Some("Provide at least one item")
        );
    }

    #[test]
    fn test_internal_failures_stay_hidden() {
        assert!(user_message(&Error::EmptyPages).is_none());
        assert!(
            user_message(&Error::NotConnected {
                path: "items.db".to_string()
            })
            .is_none()
        );
    }

    #[test]
    fn test_incident_description() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).single().unwrap();
        let text = incident_description("specials", "tester", 42, at);
        assert!(text.contains("**/specials**"));
        assert!(text.contains("(https://discord.com/users/42)"));
        assert!(text.contains("Date: **07/03/2024**"));
        assert!(text.contains("Time: **09:05:01**"));
    }
}
