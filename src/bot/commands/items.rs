//! Weapon lookup commands.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            handlers::{autocomplete::autocomplete_weapon_name, paginator::paginate},
        },
        core::items,
        errors::Result,
    };
    use tracing::info;

    /// Names shown per page of `/weapons`.
    const WEAPONS_PER_PAGE: usize = 10;

    /// Weapon categories players can pick from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum WeaponCategory {
        Melee,
        Ranged,
    }

    impl WeaponCategory {
        /// Base table holding this category.
        #[must_use]
        pub const fn table(self) -> &'static str {
            match self {
                Self::Melee => "melee",
                Self::Ranged => "ranged",
            }
        }

        /// Display label.
        #[must_use]
        pub const fn label(self) -> &'static str {
            match self {
                Self::Melee => "Melee",
                Self::Ranged => "Ranged",
            }
        }
    }

    /// Browse the special variants of a base weapon.
    #[poise::command(slash_command)]
    pub async fn specials(
        ctx: Context<'_>,
        #[description = "Weapon category"] category: WeaponCategory,
        #[description = "The base weapon to search its special variants from"]
        #[autocomplete = "autocomplete_weapon_name"]
        weapon: String,
    ) -> Result<()> {
        info!(
            "Specials lookup for '{weapon}' ({}) from {}",
            category.table(),
            ctx.author().name
        );
        let rows = {
            let store = ctx.data().items.lock().await;
            items::get_weapons_specials(&store, category.table(), &weapon).await?
        };
        let rows = items::require_found(rows, &weapon)?;
        let pages = items::item_pages(&rows, &ctx.data().settings.image_base_url);
        paginate(ctx, pages, true).await
    }

    /// List every base weapon of a category.
    #[poise::command(slash_command)]
    pub async fn weapons(
        ctx: Context<'_>,
        #[description = "Weapon category"] category: WeaponCategory,
    ) -> Result<()> {
        let rows = {
            let store = ctx.data().items.lock().await;
            items::get_column_from_table(&store, category.table(), "name").await?
        };
        let rows = items::require_found(rows, category.label())?;
        let pages = items::list_pages(
            &format!("{} weapons", category.label()),
            &rows,
            "name",
            WEAPONS_PER_PAGE,
        );
        paginate(ctx, pages, false).await
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::items::WEAPON_TABLES;

        #[test]
        fn test_categories_map_to_weapon_tables() {
            for category in [WeaponCategory::Melee, WeaponCategory::Ranged] {
                assert!(WEAPON_TABLES.contains(&category.table()));
                assert_eq!(category.label().to_lowercase(), category.table());
            }
        }
    }
}

pub use inner::*;
