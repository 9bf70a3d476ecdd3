//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `ConfigurationStore` and
//! `MerchantAccountRepository`, backed by a local `SQLite` database.
//! Sensitive settings are sealed with AES-256-GCM when an encryption password
//! is provided at construction.

mod entity;
mod merchant_account_repo;
mod migration;
mod settings_store;

use std::path::Path;

use merchant_sync_core::error::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based unified store.
///
/// If `encryption_password` is `None`, sensitive settings are stored in clear
/// text and previously sealed settings cannot be read back.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
    /// Optional password used to seal sensitive settings.
    pub(crate) encryption_password: Option<String>,
}

impl SqliteStore {
    /// Create a new `SQLite` store.
    ///
    /// - `db_path`: Path to the `SQLite` database file (created if not exists).
    /// - `encryption_password`: Password for sealing `client_secret` and `sync_secret`.
    ///
    /// # Errors
    /// Returns `CoreError::PersistenceFailure` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path, encryption_password: Option<String>) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::PersistenceFailure(format!("Failed to create directory: {e}"))
            })?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(persistence("Failed to connect to SQLite"))?;

        let store = Self {
            db,
            encryption_password,
        };

        // Ensure schema is up to date before the store is used.
        Migrator::up(&store.db, None)
            .await
            .map_err(persistence("Failed to run migrations"))?;

        log::info!("SQLite store opened at {}", db_path.display());
        Ok(store)
    }
}

/// Map a `SeaORM` error into `PersistenceFailure` with context.
pub(crate) fn persistence(context: &'static str) -> impl Fn(DbErr) -> CoreError {
    move |e| CoreError::PersistenceFailure(format!("{context}: {e}"))
}
