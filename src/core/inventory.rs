//! Inventory business logic on the users database.
//!
//! Registration goes through the [`Inventory`] entity. Item columns are chosen
//! by callers, so reads and writes of them validate and sanitize every column
//! name while user ids and amounts are always bound.

use crate::{
    core::{
        identifiers::{
            Row, query_rows, quote_identifier, sanitize_identifier, statement,
            validate_column_name, validate_table_name,
        },
        store::RecordStore,
    },
    entities::{Inventory, inventory},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, Set, Value, prelude::*};
use tracing::{info, instrument};

const TABLE: &str = "inventory";
const KEY_COLUMN: &str = "user_id";

/// Registers `user_id` with default item amounts.
///
/// Returns `false` when the user was already registered.
///
/// # Errors
/// Returns [`Error::NotConnected`] or engine errors.
#[instrument(skip(store))]
pub async fn add_user(store: &RecordStore, user_id: i64) -> Result<bool> {
    let db = store.connection()?;
    if Inventory::find_by_id(user_id).one(db).await?.is_some() {
        return Ok(false);
    }

    Inventory::insert(inventory::ActiveModel {
        user_id: Set(user_id),
    })
    .exec_without_returning(db)
    .await?;
    info!("Registered user {user_id}");
    Ok(true)
}

/// Deletes the inventory of `user_id`.
///
/// # Errors
/// Returns [`Error::UserNotFound`] when the user was not registered,
/// [`Error::NotConnected`] or engine errors otherwise.
#[instrument(skip(store))]
pub async fn remove_user(store: &RecordStore, user_id: i64) -> Result<()> {
    let db = store.connection()?;
    let result = Inventory::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::UserNotFound { user_id });
    }
    info!("Removed user {user_id}");
    Ok(())
}

/// Reads the `items` columns of the user's inventory.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for an empty item list,
/// [`Error::ColumnNotFound`] for unknown items, [`Error::UserNotFound`] when
/// the user is not registered, [`Error::NotConnected`] or engine errors
/// otherwise.
#[instrument(skip(store))]
pub async fn fetch_items(store: &RecordStore, user_id: i64, items: &[&str]) -> Result<Row> {
    if items.is_empty() {
        return Err(Error::InvalidInput {
            message: "Provide at least one item to fetch".to_string(),
        });
    }

    let db = store.connection()?;
    let columns = checked_columns(db, items.iter().copied()).await?;
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        columns.join(", "),
        quote_identifier(TABLE),
        quote_identifier(KEY_COLUMN)
    );

    query_rows(db, statement(sql, [user_id.into()]))
        .await?
        .into_iter()
        .next()
        .ok_or(Error::UserNotFound { user_id })
}

/// Sets item amounts in the user's inventory in one statement.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for an empty update list or an attempt to
/// change the key column (checked before any query runs),
/// [`Error::ColumnNotFound`] for unknown items, [`Error::UserNotFound`] when
/// the user is not registered, [`Error::NotConnected`] or engine errors
/// otherwise.
#[instrument(skip(store))]
pub async fn update_items(store: &RecordStore, user_id: i64, updates: &[(&str, i64)]) -> Result<()> {
    if updates.is_empty() {
        return Err(Error::InvalidInput {
            message: "Provide at least one item to update".to_string(),
        });
    }
    if updates
        .iter()
        .any(|(column, _)| column.trim().eq_ignore_ascii_case(KEY_COLUMN))
    {
        return Err(Error::InvalidInput {
            message: format!("'{KEY_COLUMN}' cannot be updated"),
        });
    }

    let db = store.connection()?;
    let columns = checked_columns(db, updates.iter().map(|(column, _)| *column)).await?;
    let assignments: Vec<String> = columns.iter().map(|column| format!("{column} = ?")).collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_identifier(TABLE),
        assignments.join(", "),
        quote_identifier(KEY_COLUMN)
    );

    let values: Vec<Value> = updates
        .iter()
        .map(|(_, amount)| (*amount).into())
        .chain(std::iter::once(user_id.into()))
        .collect();

    let result = db.execute(statement(sql, values)).await?;
    if result.rows_affected() == 0 {
        return Err(Error::UserNotFound { user_id });
    }
    Ok(())
}

/// Validates the table and every column, then returns the quoted, sanitized
/// column identifiers in input order.
async fn checked_columns<'a, C: ConnectionTrait>(
    db: &C,
    columns: impl Iterator<Item = &'a str>,
) -> Result<Vec<String>> {
    validate_table_name(db, TABLE).await?;

    let mut checked = Vec::new();
    for column in columns {
        let column = column.trim().to_lowercase();
        validate_column_name(db, TABLE, &column).await?;
        checked.push(quote_identifier(&sanitize_identifier(&column)));
    }
    Ok(checked)
}
