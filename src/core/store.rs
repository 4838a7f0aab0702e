//! Record store - owns the lifecycle of one `SQLite` database file.
//!
//! A [`RecordStore`] holds at most one live connection. On the first connect
//! to a file that did not exist yet it runs the configured schema script inside
//! a transaction. It can copy the file into a backup directory and restore the
//! newest copy. Table-scoped queries live in [`crate::core::items`] and
//! [`crate::core::inventory`] as free functions taking a `&RecordStore`.
//!
//! A store does no internal locking; callers sharing one instance must
//! serialize access themselves (the bot wraps each store in a mutex).

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};
use chrono::{DateTime, Local};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, TransactionTrait};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{Span, error, info, instrument, warn};

/// Connection, schema bootstrap and backup handling for one database file.
#[derive(Debug)]
pub struct RecordStore {
    file_path: PathBuf,
    schema_path: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
    connection: Option<DatabaseConnection>,
    span: Span,
}

impl RecordStore {
    /// Creates a disconnected store for `file_path`, logging under a
    /// `record_store` span named after the file.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let span = tracing::info_span!("record_store", db = %file_path.display());
        Self {
            file_path,
            schema_path: None,
            backup_dir: None,
            connection: None,
            span,
        }
    }

    /// Creates a disconnected store from its configuration section.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let mut store = Self::new(config.file.clone());
        store.schema_path.clone_from(&config.schema);
        store.backup_dir.clone_from(&config.backups);
        store
    }

    /// Schema script applied when the file is first created.
    #[must_use]
    pub fn with_schema(mut self, schema_path: impl Into<PathBuf>) -> Self {
        self.schema_path = Some(schema_path.into());
        self
    }

    /// Directory receiving backups.
    #[must_use]
    pub fn with_backups(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(backup_dir.into());
        self
    }

    /// Parent span for every lifecycle operation of this store.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The managed database file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Whether a live connection is held.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Whether the database file is present on disk.
    #[must_use]
    pub fn database_exists(&self) -> bool {
        self.file_path.is_file()
    }

    /// The live connection.
    ///
    /// # Errors
    /// Returns [`Error::NotConnected`] when the store is disconnected.
    pub fn connection(&self) -> Result<&DatabaseConnection> {
        self.connection.as_ref().ok_or_else(|| Error::NotConnected {
            path: self.file_path.display().to_string(),
        })
    }

    /// Opens the connection. When a schema is configured and the file did not
    /// exist before, the schema script is executed in a transaction.
    ///
    /// Connecting an already connected store only logs a warning.
    ///
    /// # Errors
    /// Returns the engine error if the file cannot be opened or the schema
    /// fails to apply. The error is logged before it is returned.
    #[instrument(parent = &self.span, skip_all)]
    pub async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            warn!("You're already connected to a database!");
            return Ok(());
        }

        info!("Attempting connection to the database...");
        let already_exists = self.database_exists();
        self.open().await?;

        if let Err(e) = self.bootstrap_schema(already_exists, false).await {
            error!("Error loading the database schema: {e}");
            self.abandon_connection(!already_exists).await;
            return Err(e);
        }
        Ok(())
    }

    /// Drops the live connection after a failed bootstrap. A file created by
    /// that connect is removed so the next connect starts from scratch.
    async fn abandon_connection(&mut self, remove_file: bool) {
        if let Some(connection) = self.connection.take() {
            if let Err(e) = connection.close().await {
                warn!("Error closing the half-initialised connection: {e}");
            }
        }
        if !remove_file {
            return;
        }

        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut path = self.file_path.clone().into_os_string();
            path.push(suffix);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {e}", PathBuf::from(path).display()),
            }
        }
    }

    /// Closes the connection. Statements outside explicit transactions are
    /// committed as they run, so closing never drops written data.
    ///
    /// Disconnecting a disconnected store only logs a warning.
    ///
    /// # Errors
    /// Returns the engine error if closing fails.
    #[instrument(parent = &self.span, skip_all)]
    pub async fn disconnect(&mut self) -> Result<()> {
        let Some(connection) = self.connection.take() else {
            warn!("You are not connected to any database!");
            return Ok(());
        };

        info!("Attempting to disconnect from the database...");
        connection
            .close()
            .await
            .inspect_err(|e| error!("Error disconnecting from the database: {e}"))?;
        info!("Successfully disconnected from the database.");
        Ok(())
    }

    /// Applies the schema script on demand.
    ///
    /// Without `overwrite` this is a no-op for an existing file. With
    /// `overwrite` a backup is taken first, then the script runs against the
    /// live file; the schema is expected to drop what it recreates.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when overwriting without a backup directory,
    /// and I/O or engine errors from the backup or the script.
    #[instrument(parent = &self.span, skip(self))]
    pub async fn load_schema(&mut self, overwrite: bool) -> Result<()> {
        let exists = self.database_exists();
        self.bootstrap_schema(exists, overwrite).await
    }

    /// Copies the database file to
    /// `<backups>/[dd-mm-YYYY]_-_[HH-MM-SS]_-_<file name>.bak`. An existing
    /// backup is never replaced; a second backup in the same second is named
    /// `..._[HH-MM-SS]_1_-_...`.
    ///
    /// The store is disconnected for the copy and reconnected afterwards, even
    /// when the copy fails.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when no backup directory is configured (the
    /// connection is left untouched), or I/O and engine errors.
    #[instrument(parent = &self.span, skip_all)]
    pub async fn backup(&mut self) -> Result<PathBuf> {
        let backup_dir = self.backup_dir.clone().ok_or_else(|| Error::Config {
            message: format!(
                "No backup directory configured for {}",
                self.file_path.display()
            ),
        })?;

        info!("Creating a database backup...");
        tokio::fs::create_dir_all(&backup_dir).await?;

        if self.is_connected() {
            self.disconnect().await?;
        }
        let copied = copy_to_new_backup(&self.file_path, &backup_dir, Local::now()).await;
        self.open().await?;
        let backup_path = copied?;

        info!("Database backup complete: {}", backup_path.display());
        Ok(backup_path)
    }

    /// Overwrites the database file with the most recently created backup.
    ///
    /// Returns the backup used, or `None` (with a warning) when there is none;
    /// the live file is never touched in that case.
    ///
    /// # Errors
    /// Returns I/O errors from scanning or copying and engine errors from
    /// reconnecting.
    #[instrument(parent = &self.span, skip_all)]
    pub async fn recover(&mut self) -> Result<Option<PathBuf>> {
        info!("Recovering the latest database backup...");
        let Some(backup_dir) = self.backup_dir.clone() else {
            warn!("No backup directory configured!");
            return Ok(None);
        };
        let Some(latest) = latest_backup(&backup_dir).await? else {
            warn!("No backup files found!");
            return Ok(None);
        };

        if self.is_connected() {
            self.disconnect().await?;
        }
        let copied = tokio::fs::copy(&latest, &self.file_path).await;
        self.open().await?;
        copied?;

        info!("Database recovery complete from {}", latest.display());
        Ok(Some(latest))
    }

    async fn open(&mut self) -> Result<()> {
        let url = format!("sqlite://{}?mode=rwc", self.file_path.display());
        let mut options = ConnectOptions::new(url);
        options.max_connections(1).sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .inspect_err(|e| error!("Error connecting to the database: {e}"))?;
        self.connection = Some(connection);
        info!("Successfully connected to {}", self.file_path.display());
        Ok(())
    }

    async fn bootstrap_schema(&mut self, database_exists: bool, overwrite: bool) -> Result<()> {
        let Some(schema_path) = self.schema_path.clone() else {
            info!("No database schema was provided. Skipping this step.");
            return Ok(());
        };

        if database_exists && !overwrite {
            info!("Database file already exists, skipping schema...");
            return Ok(());
        }

        if database_exists {
            warn!("Database schema overwrite is enabled, PROCEED WITH CAUTION!");
            self.backup().await?;
        } else {
            info!("Loading database schema for the first time.");
        }

        let script = tokio::fs::read_to_string(&schema_path).await?;
        let txn = self.connection()?.begin().await?;
        txn.execute_unprepared(&script).await?;
        txn.commit().await?;

        info!("Successfully loaded {} schema.", schema_path.display());
        Ok(())
    }
}

/// Backup file name for `database` taken at `taken_at`.
#[must_use]
pub fn backup_file_name(database: &Path, taken_at: DateTime<Local>) -> String {
    let file_name = database
        .file_name()
        .map_or_else(|| "database".into(), |name| name.to_string_lossy());
    format!(
        "{}_-_{file_name}.bak",
        taken_at.format("[%d-%m-%Y]_-_[%H-%M-%S]")
    )
}

const MAX_BACKUPS_PER_SECOND: u32 = 1000;

/// Copies `database` into a backup file under `dir` that did not exist before.
/// Backups taken within the same second get a `_<n>` counter after the time.
async fn copy_to_new_backup(
    database: &Path,
    dir: &Path,
    taken_at: DateTime<Local>,
) -> Result<PathBuf> {
    let mut source = tokio::fs::File::open(database).await?;
    let base_name = backup_file_name(database, taken_at);

    for attempt in 0..MAX_BACKUPS_PER_SECOND {
        let path = dir.join(numbered_backup_name(&base_name, attempt));
        let mut target = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        };

        tokio::io::copy(&mut source, &mut target).await?;
        target.sync_all().await?;
        return Ok(path);
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("too many backups named {base_name} in {}", dir.display()),
    )
    .into())
}

/// `base` for the first attempt, then `base` with `_<attempt>` after the
/// timestamp.
fn numbered_backup_name(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        return base.to_string();
    }
    match base.split_once("]_-_") {
        Some((stamp, rest)) => match rest.split_once("]_-_") {
            Some((time, file)) => format!("{stamp}]_-_{time}]_{attempt}_-_{file}"),
            None => format!("{attempt}_{base}"),
        },
        None => format!("{attempt}_{base}"),
    }
}

/// Newest `*.bak` file in `dir` by creation time (modification time where the
/// filesystem does not report creation). A missing directory has no backups.
async fn latest_backup(dir: &Path) -> Result<Option<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "bak") {
            continue;
        }
        let metadata = entry.metadata().await?;
        let stamp = metadata.created().or_else(|_| metadata.modified())?;
        if latest
            .as_ref()
            .is_none_or(|newest| (stamp, &path) >= (newest.0, &newest.1))
        {
            latest = Some((stamp, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}
