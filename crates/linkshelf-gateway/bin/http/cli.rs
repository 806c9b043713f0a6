use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use linkshelf_storage::{DropConfirmation, InitMode, MySqlSettings};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LINKSHELF_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "LINKSHELF_STORAGE";
pub const LOG_FORMAT_ENV: &str = "LINKSHELF_LOG_FORMAT";
pub const MYSQL_HOST_ENV: &str = "LINKSHELF_MYSQL_HOST";
pub const MYSQL_PORT_ENV: &str = "LINKSHELF_MYSQL_PORT";
pub const MYSQL_DBNAME_ENV: &str = "LINKSHELF_MYSQL_DBNAME";
pub const MYSQL_USER_ENV: &str = "LINKSHELF_MYSQL_USER";
pub const MYSQL_PASSWORD_ENV: &str = "LINKSHELF_MYSQL_PASSWORD";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:31456";
pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "linkshelf", version, about = "A small URL shortener")]
pub struct CLI {
    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the API and the redirects.
    Run(RunArgs),
    /// Create the MySQL schema, optionally recreating the whole database.
    InitStorage(InitStorageArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[command(flatten)]
    pub mysql: MySqlArgs,
}

#[derive(Debug, Args)]
pub struct MySqlArgs {
    #[arg(long, env = MYSQL_HOST_ENV, default_value = DEFAULT_MYSQL_HOST)]
    pub mysql_host: String,

    #[arg(long, env = MYSQL_PORT_ENV, default_value_t = DEFAULT_MYSQL_PORT)]
    pub mysql_port: u16,

    #[arg(long, env = MYSQL_DBNAME_ENV)]
    pub mysql_dbname: Option<String>,

    #[arg(long, env = MYSQL_USER_ENV)]
    pub mysql_user: Option<String>,

    #[arg(long, env = MYSQL_PASSWORD_ENV, hide_env_values = true)]
    pub mysql_password: Option<String>,
}

impl MySqlArgs {
    pub fn settings(&self) -> anyhow::Result<MySqlSettings> {
        let database = required(&self.mysql_dbname, "--mysql-dbname")?;
        let username = required(&self.mysql_user, "--mysql-user")?;
        let password = required(&self.mysql_password, "--mysql-password")?;

        Ok(MySqlSettings::builder()
            .host(self.mysql_host.clone())
            .port(self.mysql_port)
            .username(username)
            .password(password)
            .database(database)
            .build())
    }
}

fn required(value: &Option<String>, flag: &str) -> anyhow::Result<String> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{flag} is required for the mysql storage"))
}

#[derive(Debug, Args)]
pub struct InitStorageArgs {
    #[command(flatten)]
    pub mysql: MySqlArgs,

    /// Drop and recreate the database. Every stored link is lost.
    #[arg(long)]
    pub create_database: bool,

    /// Confirms that `--create-database` may drop the existing database.
    #[arg(long)]
    pub confirm_drop: bool,
}

impl InitStorageArgs {
    pub fn mode(&self) -> anyhow::Result<InitMode> {
        match (self.create_database, self.confirm_drop) {
            (true, true) => Ok(InitMode::RecreateDatabase(DropConfirmation::confirmed())),
            (true, false) => bail!("--create-database drops all data; pass --confirm-drop as well"),
            (false, _) => Ok(InitMode::CreateTables),
        }
    }
}
