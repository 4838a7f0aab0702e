//! Rotating "Watching ..." presence.

use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::debug;

/// Cycles through `statuses` forever, waiting `interval` (at least one
/// second) between changes. Returns immediately when there is nothing to show.
pub async fn rotate_statuses(ctx: serenity::Context, statuses: Vec<String>, interval: Duration) {
    if statuses.is_empty() {
        debug!("No presence statuses configured.");
        return;
    }

    let interval = interval.max(Duration::from_secs(1));
    for status in statuses.iter().cycle() {
        ctx.set_presence(
            Some(serenity::ActivityData::watching(status)),
            serenity::OnlineStatus::Idle,
        );
        tokio::time::sleep(interval).await;
    }
}
