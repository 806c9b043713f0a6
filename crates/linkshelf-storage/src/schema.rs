//! Provisioning of the MySQL schema used by [`MySqlLinkStorage`][crate::MySqlLinkStorage].
//!
//! Nothing in here runs implicitly. Request-serving code only ever connects
//! to an existing database; the destructive path additionally requires a
//! [`DropConfirmation`], which callers have to construct on purpose.

use crate::mysql::map_sqlx_error;
use linkshelf_core::{Result, StorageError};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Executor, MySqlPool};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// DDL of the `links` table. The short name column is uniquely indexed so
/// the database rejects duplicates even when two writers race.
pub const CREATE_LINKS_TABLE: &str = include_str!("../ddl/mysql/links.sql");

/// Connection settings for a MySQL server and the database holding links.
#[derive(Debug, Clone, TypedBuilder)]
pub struct MySqlSettings {
    #[builder(default = "localhost".to_string(), setter(into))]
    pub host: String,
    #[builder(default = 3306)]
    pub port: u16,
    #[builder(setter(into))]
    pub username: String,
    #[builder(setter(into))]
    pub password: String,
    #[builder(setter(into))]
    pub database: String,
}

impl MySqlSettings {
    /// Options for connecting to the links database.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }

    /// Options for connecting to the server without selecting a database.
    fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
    }
}

/// Proof that the caller explicitly asked for the database to be dropped.
#[derive(Debug)]
pub struct DropConfirmation(());

impl DropConfirmation {
    /// Confirms that all data in the target database may be destroyed.
    pub fn confirmed() -> Self {
        Self(())
    }
}

/// What [`init_storage`] should do before creating the tables.
#[derive(Debug)]
pub enum InitMode {
    /// Create missing tables inside the existing database.
    CreateTables,
    /// Drop the whole database, create it again, then create the tables.
    RecreateDatabase(DropConfirmation),
}

/// Prepares a MySQL database for [`MySqlLinkStorage`][crate::MySqlLinkStorage].
pub async fn init_storage(settings: &MySqlSettings, mode: InitMode) -> Result<()> {
    if let InitMode::RecreateDatabase(confirmation) = mode {
        drop_database(settings, confirmation).await?;
        create_database(settings).await?;
    }

    let pool = MySqlPool::connect_with(settings.connect_options())
        .await
        .map_err(map_sqlx_error)?;
    let created = create_tables(&pool).await;
    pool.close().await;
    created
}

/// Creates the `links` table if it does not exist yet.
pub async fn create_tables(pool: &MySqlPool) -> Result<()> {
    pool.execute(CREATE_LINKS_TABLE)
        .await
        .map_err(map_sqlx_error)?;
    info!("links table is ready");
    Ok(())
}

/// Drops the configured database including every stored link.
pub async fn drop_database(settings: &MySqlSettings, _confirmation: DropConfirmation) -> Result<()> {
    let name = quoted_database_name(&settings.database)?;
    warn!(database = %settings.database, "dropping database");
    execute_on_server(settings, &format!("DROP DATABASE IF EXISTS {name}")).await
}

async fn create_database(settings: &MySqlSettings) -> Result<()> {
    let name = quoted_database_name(&settings.database)?;
    info!(database = %settings.database, "creating database");
    execute_on_server(
        settings,
        &format!("CREATE DATABASE IF NOT EXISTS {name} CHARACTER SET utf8mb4"),
    )
    .await
}

async fn execute_on_server(settings: &MySqlSettings, statement: &str) -> Result<()> {
    let mut conn = MySqlConnection::connect_with(&settings.server_options())
        .await
        .map_err(map_sqlx_error)?;
    conn.execute(statement).await.map_err(map_sqlx_error)?;
    conn.close().await.map_err(map_sqlx_error)
}

/// Database names are spliced into DDL, so only a conservative character
/// set is accepted.
fn quoted_database_name(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid {
        return Err(StorageError::Failure(format!(
            "refusing to use database name '{name}'"
        )));
    }
    Ok(format!("`{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_database_names() {
        assert_eq!(quoted_database_name("linkshelf").unwrap(), "`linkshelf`");
        assert_eq!(quoted_database_name("links_2024").unwrap(), "`links_2024`");
    }

    #[test]
    fn rejects_suspicious_database_names() {
        let too_long = "a".repeat(65);
        for name in ["", "a`b", "a b", "links; DROP TABLE x", too_long.as_str()] {
            assert!(quoted_database_name(name).is_err(), "{name}");
        }
    }

    #[test]
    fn ddl_declares_unique_short_name() {
        assert!(CREATE_LINKS_TABLE.contains("UNIQUE INDEX `short_name`"));
        assert!(CREATE_LINKS_TABLE.contains("AUTO_INCREMENT"));
    }

    #[test]
    fn settings_defaults() {
        let settings = MySqlSettings::builder()
            .username("user")
            .password("secret")
            .database("links")
            .build();

        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 3306);
    }
}
