//! Identifier handling for dynamic SQL.
//!
//! `SQLite` cannot bind table or column names as parameters, so any query that
//! names them dynamically goes through three steps, in this order:
//! 1. [`validate_table_name`] / [`validate_column_name`] against the live catalog
//!    (the lookup itself uses bound parameters),
//! 2. [`sanitize_input`] to strip everything outside an allow-list,
//! 3. [`quote_identifier`] when interpolating into the statement.
//!
//! Data values never take this path; they are always bound.

use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, Value};
use serde_json::Map;

/// One result row, keyed by column name.
pub type Row = Map<String, serde_json::Value>;

/// Fails with [`Error::TableNotFound`] unless `table` is a user table of the
/// connected database. Internal `sqlite_*` tables never validate.
pub async fn validate_table_name<C: ConnectionTrait>(db: &C, table: &str) -> Result<()> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'",
        [table.into()],
    );

    if db.query_one(stmt).await?.is_some() {
        Ok(())
    } else {
        tracing::debug!(table, "Rejected unknown table name");
        Err(Error::TableNotFound {
            table: table.to_string(),
        })
    }
}

/// Fails with [`Error::ColumnNotFound`] unless `column` exists on `table`.
/// Call [`validate_table_name`] first; an unknown table has no columns.
pub async fn validate_column_name<C: ConnectionTrait>(
    db: &C,
    table: &str,
    column: &str,
) -> Result<()> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "SELECT name FROM pragma_table_info(?) WHERE name = ?",
        [table.into(), column.into()],
    );

    if db.query_one(stmt).await?.is_some() {
        Ok(())
    } else {
        tracing::debug!(table, column, "Rejected unknown column name");
        Err(Error::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

/// Allow-list transform for one identifier: surrounding whitespace is
/// trimmed and every character that is not alphanumeric, `_` or whitespace is
/// dropped. Quotes, `%`, backslashes and `;` therefore never survive.
#[must_use]
pub fn sanitize_identifier(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || ch.is_whitespace())
        .collect()
}

/// Applies [`sanitize_identifier`] to every input, preserving order.
#[must_use]
pub fn sanitize_input(inputs: &[&str]) -> Vec<String> {
    inputs.iter().map(|input| sanitize_identifier(input)).collect()
}

/// Wraps an already sanitized identifier in double quotes for interpolation.
#[must_use]
pub fn quote_identifier(sanitized: &str) -> String {
    format!("\"{}\"", sanitized.replace('"', "\"\""))
}

/// Runs a query and returns one mapping per row.
pub async fn query_rows<C: ConnectionTrait>(db: &C, stmt: Statement) -> Result<Vec<Row>> {
    let values = serde_json::Value::find_by_statement(stmt).all(db).await?;
    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Object(row) => Some(row),
            _ => None,
        })
        .collect())
}

/// Builds a `SQLite` statement from interpolated SQL and bound values.
pub(crate) fn statement<I>(sql: String, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DbBackend::Sqlite, sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::setup_items_store};

    #[test]
    fn test_sanitize_identifier_strips_injection_characters() {
        assert_eq!(sanitize_identifier("  melee  "), "melee");
        assert_eq!(sanitize_identifier("melee; DROP TABLE melee"), "melee DROP TABLE melee");
        assert_eq!(sanitize_identifier("name' OR '1'='1"), "name OR 11");
        assert_eq!(sanitize_identifier("na%me\\_x\""), "name_x");
        assert_eq!(sanitize_identifier("melee_specials"), "melee_specials");
    }

    #[test]
    fn test_sanitize_input_keeps_order() {
        let sanitized = sanitize_input(&["melee;", " name ", "id_melee"]);
        assert_eq!(sanitized, vec!["melee", "name", "id_melee"]);
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("melee"), "\"melee\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[tokio::test]
    async fn test_validate_table_name() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        let db = store.connection()?;

        validate_table_name(db, "melee").await?;
        validate_table_name(db, "ranged_specials").await?;

        let result = validate_table_name(db, "nonexistent").await;
        assert!(matches!(result, Err(Error::TableNotFound { table }) if table == "nonexistent"));

        let result = validate_table_name(db, "sqlite_sequence").await;
        assert!(matches!(result, Err(Error::TableNotFound { .. })));

        let result = validate_table_name(db, "melee; DROP TABLE melee").await;
        assert!(matches!(result, Err(Error::TableNotFound { .. })));
        validate_table_name(db, "melee").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_column_name() -> Result<()> {
        let (_dir, store) = setup_items_store().await?;
        let db = store.connection()?;

        validate_column_name(db, "melee", "name").await?;
        validate_column_name(db, "melee_specials", "id_melee").await?;

        let result = validate_column_name(db, "melee", "price").await;
        assert!(matches!(
            result,
            Err(Error::ColumnNotFound { table, column }) if table == "melee" && column == "price"
        ));
        Ok(())
    }
}
