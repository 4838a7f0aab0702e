//! Item lookups on the items database.
//!
//! Weapon tables come in pairs: a base table (`melee`, `ranged`, ...) and a
//! `<table>_specials` child table whose `id_<table>` column references the
//! base weapon. Table names reach these functions from command arguments, so
//! every dynamic identifier is validated, sanitized and quoted before use.

use crate::{
    core::{
        format::{fix_url, title_case},
        identifiers::{
            Row, query_rows, quote_identifier, sanitize_input, statement, validate_column_name,
            validate_table_name,
        },
        paginator::Page,
        store::RecordStore,
    },
    errors::{Error, Result},
};
use tracing::instrument;

/// Base weapon tables shipped with the items schema.
pub const WEAPON_TABLES: [&str; 2] = ["melee", "ranged"];

/// Selects one column of every row of `table_name`.
///
/// Both names are lower-cased, checked against the live schema, sanitized and
/// only then interpolated.
///
/// # Errors
/// Returns [`Error::TableNotFound`] or [`Error::ColumnNotFound`] for unknown
/// names, [`Error::NotConnected`] or engine errors otherwise.
#[instrument(skip(store))]
pub async fn get_column_from_table(
    store: &RecordStore,
    table_name: &str,
    column_name: &str,
) -> Result<Vec<Row>> {
    let db = store.connection()?;
    let table = table_name.to_lowercase();
    let column = column_name.to_lowercase();

    validate_table_name(db, &table).await?;
    validate_column_name(db, &table, &column).await?;

    let [table, column] = sanitized_pair(&table, &column);
    let sql = format!(
        "SELECT {} FROM {}",
        quote_identifier(&column),
        quote_identifier(&table)
    );
    query_rows(db, statement(sql, Vec::new())).await
}

/// Every special variant of `base_weapon_name` in `<table_name>_specials`.
///
/// The weapon name is title-cased and bound as a parameter. An unknown weapon
/// yields an empty list; use [`require_found`] when that should be an error.
///
/// # Errors
/// Returns [`Error::TableNotFound`] when either table is missing,
/// [`Error::NotConnected`] or engine errors otherwise.
#[instrument(skip(store))]
pub async fn get_weapons_specials(
    store: &RecordStore,
    table_name: &str,
    base_weapon_name: &str,
) -> Result<Vec<Row>> {
    let db = store.connection()?;
    let table = table_name.to_lowercase();
    let specials = format!("{table}_specials");
    let base_weapon = title_case(base_weapon_name.trim());

    validate_table_name(db, &table).await?;
    validate_table_name(db, &specials).await?;

    let [table, specials] = sanitized_pair(&table, &specials);
    let base = quote_identifier(&table);
    let child = quote_identifier(&specials);
    let foreign_key = quote_identifier(&format!("id_{table}"));
    let sql = format!(
        "SELECT {child}.* FROM {base} \
         INNER JOIN {child} ON {base}.id = {child}.{foreign_key} \
         WHERE {base}.name = ? \
         ORDER BY {child}.id"
    );

    let rows = query_rows(db, statement(sql, [base_weapon.into()])).await?;
    tracing::debug!(count = rows.len(), "Fetched special variants");
    Ok(rows)
}

/// Turns an empty lookup into [`Error::ItemNotFound`] for `key`.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] when `rows` is empty.
pub fn require_found(rows: Vec<Row>, key: &str) -> Result<Vec<Row>> {
    if rows.is_empty() {
        Err(Error::ItemNotFound {
            item: key.to_string(),
        })
    } else {
        Ok(rows)
    }
}

/// One page per item row: `name` becomes the title, `description` the body
/// and `image_path` (joined to `image_base_url`) the image.
#[must_use]
pub fn item_pages(rows: &[Row], image_base_url: &str) -> Vec<Page> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| Page {
            title: text(row, "name").unwrap_or_else(|| "Unknown item".to_string()),
            description: text(row, "description"),
            image_url: text(row, "image_path").map(|path| fix_url(&format!("{image_base_url}{path}"))),
            position,
        })
        .collect()
}

/// Lists the `column` values of `rows`, `per_page` entries per page.
#[must_use]
pub fn list_pages(title: &str, rows: &[Row], column: &str, per_page: usize) -> Vec<Page> {
    let names: Vec<String> = rows.iter().filter_map(|row| text(row, column)).collect();
    names
        .chunks(per_page.max(1))
        .enumerate()
        .map(|(position, chunk)| Page {
            title: title.to_string(),
            description: Some(
                chunk
                    .iter()
                    .map(|name| format!("• {name}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            image_url: None,
            position,
        })
        .collect()
}

fn text(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

fn sanitized_pair(first: &str, second: &str) -> [String; 2] {
    let mut sanitized = sanitize_input(&[first, second]).into_iter();
    [
        sanitized.next().unwrap_or_default(),
        sanitized.next().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{seed_weapon, setup_items_store};
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_get_weapons_specials_returns_joined_rows() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        let axe = seed_weapon(&store, "melee", "Axe", &["Axe of Fire", "Axe of Ice"]).await?;
        seed_weapon(&store, "melee", "Sword", &["Sword of Wind"]).await?;

        let rows = get_weapons_specials(&store, "melee", "Axe").await?;
        assert_eq!(rows.len(), 2);
        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Axe of Fire", "Axe of Ice"]);
        assert!(rows.iter().all(|r| r["id_melee"] == json!(axe)));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_weapons_specials_normalizes_input() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        seed_weapon(&store, "melee", "Axe", &["Axe of Fire"]).await?;

        let rows = get_weapons_specials(&store, "MELEE", "  aXe ").await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_weapons_specials_unknown_weapon_is_empty() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        seed_weapon(&store, "melee", "Axe", &["Axe of Fire"]).await?;

        let rows = get_weapons_specials(&store, "melee", "Unknown").await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_weapons_specials_bound_name_is_not_interpolated() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        seed_weapon(&store, "melee", "Axe", &["Axe of Fire"]).await?;

        let rows = get_weapons_specials(&store, "melee", "x' OR '1'='1").await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_weapons_specials_unknown_table() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;

        let result = get_weapons_specials(&store, "magic", "Wand").await;
        assert!(matches!(result, Err(Error::TableNotFound { table }) if table == "magic"));

        let result = get_weapons_specials(&store, "melee_specials", "Axe").await;
        assert!(
            matches!(result, Err(Error::TableNotFound { table }) if table == "melee_specials_specials")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_column_from_table() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        seed_weapon(&store, "ranged", "Bow", &[]).await?;
        seed_weapon(&store, "ranged", "Crossbow", &[]).await?;

        let rows = get_column_from_table(&store, "Ranged", "NAME").await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["name"], json!("Bow"));
        assert_eq!(rows[1]["name"], json!("Crossbow"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_column_from_table_rejects_unknown_names() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;

        let result = get_column_from_table(&store, "nonexistent", "name").await;
        assert!(matches!(result, Err(Error::TableNotFound { .. })));

        let result = get_column_from_table(&store, "melee", "name; DROP TABLE melee").await;
        assert!(matches!(result, Err(Error::ColumnNotFound { .. })));

        assert!(get_column_from_table(&store, "melee", "name").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_queries_require_connection() -> Result<()> {
        let (_dir, mut store) = setup_items_store().await?;
        store.disconnect().await?;

        let result = get_column_from_table(&store, "melee", "name").await;
        assert!(matches!(result, Err(Error::NotConnected { .. })));
        Ok(())
    }

    #[test]
    fn test_require_found() {
        assert!(matches!(
            require_found(Vec::new(), "Spoon"),
            Err(Error::ItemNotFound { item }) if item == "Spoon"
        ));
        let rows = vec![row(json!({"name": "Axe"}))];
        assert_eq!(require_found(rows, "Axe").unwrap().len(), 1);
    }

    #[test]
    fn test_item_pages() {
        let rows = vec![
            row(json!({
                "name": "Axe of Fire",
                "description": "Burns.",
                "image_path": "images\\melee\\axe of fire.png",
            })),
            row(json!({"name": "Axe of Ice", "description": null, "image_path": null})),
        ];

        let pages = item_pages(&rows, "https://example.com/");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "Axe of Fire");
        assert_eq!(pages[0].description.as_deref(), Some("Burns."));
        assert_eq!(
            pages[0].image_url.as_deref(),
            Some("https://example.com/images/melee/axe%20of%20fire.png")
        );
        assert_eq!(pages[1].position, 1);
        assert!(pages[1].description.is_none());
        assert!(pages[1].image_url.is_none());
    }

    #[test]
    fn test_list_pages_chunks_names() {
        let rows: Vec<Row> = (0..12)
            .map(|i| row(json!({ "name": format!("Weapon {i}") })))
            .collect();

        let pages = list_pages("Melee weapons", &rows, "name", 5);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].title, "Melee weapons");
        assert_eq!(
            pages[2].description.as_deref(),
            Some("• Weapon 10\n• Weapon 11")
        );
        assert!(list_pages("Empty", &[], "name", 5).is_empty());
    }
}
