//! Paginator host adapter.
//!
//! Sends the first page of a [`Paginator`] with its navigation buttons, then
//! feeds button presses into the state machine until no press arrives within
//! the configured timeout. Every later change edits that same message; once
//! the session expires the buttons are disabled.

use crate::{
    bot::Context,
    core::paginator::{Controls, NavEvent, Page, Paginator, Rejection},
    errors::Result,
};
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

const COUNTER_ID: &str = "counter";

/// Shows `pages` to the invoking user. With `restricted`, only the invoker
/// may turn pages; anyone else gets an ephemeral refusal.
///
/// # Errors
/// Returns [`crate::errors::Error::EmptyPages`] for an empty page list and
/// framework errors from sending the first page.
pub async fn paginate(ctx: Context<'_>, pages: Vec<Page>, restricted: bool) -> Result<()> {
    let session_id = ctx.id();
    let color = ctx.data().embed_color;
    let timeout = ctx.data().settings.paginator_timeout();
    let mut paginator = Paginator::new(pages, ctx.author().id.get())?.restricted(restricted);

    let handle = ctx
        .send(
            poise::CreateReply::default()
                .embed(page_embed(paginator.current_page(), color))
                .components(control_rows(session_id, &paginator.controls())),
        )
        .await?;

    let prefix = component_id(session_id, "");
    loop {
        let filter_prefix = prefix.clone();
        let Some(press) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .filter(move |press| press.data.custom_id.starts_with(&filter_prefix))
            .timeout(timeout)
            .await
        else {
            break;
        };

        let Some(event) = parse_component_id(session_id, &press.data.custom_id) else {
            continue;
        };

        let response = match paginator.navigate(press.user.id.get(), event) {
            Ok(cursor) => {
                debug!(session_id, cursor, "Page turned");
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(page_embed(paginator.current_page(), color))
                        .components(control_rows(session_id, &paginator.controls())),
                )
            }
            Err(Rejection::NotOwner) => serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content("Only the person who used this command can turn its pages.")
                    .ephemeral(true),
            ),
            Err(Rejection::Expired) => break,
        };
        let answered = press.create_response(ctx.serenity_context(), response).await;
        if !keep_listening(session_id, &answered) {
            break;
        }
    }

    paginator.expire();
    debug!(session_id, "Pagination session expired");
    if let Err(e) = handle
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(page_embed(paginator.current_page(), color))
                .components(control_rows(session_id, &paginator.controls())),
        )
        .await
    {
        warn!("Could not disable pagination controls, the message is probably gone: {e}");
    }
    Ok(())
}

/// Whether the session keeps collecting presses after answering one. A failed
/// answer ends it, so the controls still get disabled.
fn keep_listening(session_id: u64, answered: &serenity::Result<()>) -> bool {
    match answered {
        Ok(()) => true,
        Err(e) => {
            warn!(session_id, "Could not answer a pagination press, closing the session: {e}");
            false
        }
    }
}

/// Embed for one page.
#[must_use]
pub fn page_embed(page: &Page, color: u32) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new().title(&page.title).color(color);
    if let Some(description) = &page.description {
        embed = embed.description(description);
    }
    if let Some(url) = &page.image_url {
        embed = embed.image(url);
    }
    embed
}

/// `<<  <  counter  >  >>` buttons reflecting `controls`.
#[must_use]
pub fn control_rows(session_id: u64, controls: &Controls) -> Vec<serenity::CreateActionRow> {
    let nav_button = |event: NavEvent, label: &str, style: serenity::ButtonStyle| {
        serenity::CreateButton::new(component_id(session_id, event.id()))
            .label(label)
            .style(style)
            .disabled(controls.is_disabled(event))
    };

    vec![serenity::CreateActionRow::Buttons(vec![
        nav_button(NavEvent::First, "<<", serenity::ButtonStyle::Success),
        nav_button(NavEvent::Previous, "<", serenity::ButtonStyle::Primary),
        serenity::CreateButton::new(component_id(session_id, COUNTER_ID))
            .label(&controls.counter)
            .style(serenity::ButtonStyle::Secondary)
            .disabled(true),
        nav_button(NavEvent::Next, ">", serenity::ButtonStyle::Primary),
        nav_button(NavEvent::Last, ">>", serenity::ButtonStyle::Success),
    ])]
}

/// Component id of a control in session `session_id`.
#[must_use]
pub fn component_id(session_id: u64, control: &str) -> String {
    format!("{session_id}:{control}")
}

/// Navigation event encoded in a component id of session `session_id`.
#[must_use]
pub fn parse_component_id(session_id: u64, custom_id: &str) -> Option<NavEvent> {
    custom_id
        .strip_prefix(&component_id(session_id, ""))
        .and_then(NavEvent::from_id)
}
