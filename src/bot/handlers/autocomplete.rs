//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::Context,
    core::{items, items::WEAPON_TABLES},
};

/// Discord caps autocomplete suggestions at 25 entries.
const MAX_SUGGESTIONS: usize = 25;

/// Suggests base weapon names from every weapon table that contain `partial`.
///
/// Lookup failures yield no suggestions; the command itself reports errors.
pub async fn autocomplete_weapon_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial = partial.to_lowercase();
    let store = ctx.data().items.lock().await;

    let mut names = Vec::new();
    for table in WEAPON_TABLES {
        let Ok(rows) = items::get_column_from_table(&store, table, "name").await else {
            continue;
        };
        names.extend(
            rows.iter()
                .filter_map(|row| row.get("name").and_then(|v| v.as_str()))
                .filter(|name| name.to_lowercase().contains(&partial))
                .map(str::to_string),
        );
    }
    drop(store);

    names.sort();
    names.dedup();
    names.truncate(MAX_SUGGESTIONS);
    names
}
