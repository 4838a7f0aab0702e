//! Shared test utilities.
//!
//! Stores are created in a fresh temporary directory using the schema scripts
//! shipped in `databases/schemas`. Keep the returned `TempDir` alive for as
//! long as the store is used.

use crate::{core::store::RecordStore, errors::Result};
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Routes tracing output to the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Schema script of the items database.
#[must_use]
pub fn items_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("databases/schemas/items_db_schema.sql")
}

/// Schema script of the users database.
#[must_use]
pub fn users_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("databases/schemas/users_db_schema.sql")
}

/// A connected items store on a freshly bootstrapped file.
pub async fn setup_items_store() -> Result<(TempDir, RecordStore)> {
    init_test_tracing();
    let dir = tempfile::tempdir()?;
    let mut store = RecordStore::new(dir.path().join("items.db")).with_schema(items_schema_path());
    store.connect().await?;
    Ok((dir, store))
}

/// A connected users store on a freshly bootstrapped file.
pub async fn setup_users_store() -> Result<(TempDir, RecordStore)> {
    init_test_tracing();
    let dir = tempfile::tempdir()?;
    let mut store = RecordStore::new(dir.path().join("users.db")).with_schema(users_schema_path());
    store.connect().await?;
    Ok((dir, store))
}

/// Inserts a base weapon into `table` plus one `<table>_specials` row per
/// entry of `specials`, returning the weapon id. `table` must be trusted.
pub async fn seed_weapon(
    store: &RecordStore,
    table: &str,
    name: &str,
    specials: &[&str],
) -> Result<i64> {
    let db = store.connection()?;
    let result = db
        .execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!("INSERT INTO {table} (name, description, image_path) VALUES (?, ?, ?)"),
            [
                name.into(),
                format!("A plain {name}.").into(),
                format!("images/{table}/{name}.png").into(),
            ],
        ))
        .await?;
    #[allow(clippy::cast_possible_wrap)]
    let id = result.last_insert_id() as i64;

    for special in specials {
        db.execute(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            format!(
                "INSERT INTO {table}_specials (id_{table}, name, description, image_path) VALUES (?, ?, ?, ?)"
            ),
            [
                id.into(),
                (*special).into(),
                format!("A special {name}.").into(),
                format!("images/{table}/specials/{special}.png").into(),
            ],
        ))
        .await?;
    }

    Ok(id)
}
