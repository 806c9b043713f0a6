use crate::{Result, TestInfraError};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use typed_builder::TypedBuilder;

pub const ROOT_USER: &str = "root";
pub const ROOT_PASSWORD: &str = "root";

const IMAGE: &str = "mysql";
const TAG: &str = "8.4";
const PORT: u16 = 3306;

const CONNECT_ATTEMPTS: u32 = 40;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

/// The application account created inside the container.
#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "linkshelf".to_string(), setter(into))]
    pub database: String,
    #[builder(default = "linkshelf".to_string(), setter(into))]
    pub username: String,
    #[builder(default = "linkshelf".to_string(), setter(into))]
    pub password: String,
}

/// A disposable MySQL server. The container is removed on drop.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    pub async fn start(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new(IMAGE, TAG)
            .with_exposed_port(PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", ROOT_PASSWORD)
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    pub async fn host(&self) -> Result<String> {
        Ok(self.container.get_host().await?.to_string())
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(PORT).await?)
    }

    /// Options for the application account on the application database.
    pub async fn connect_options(&self) -> Result<MySqlConnectOptions> {
        Ok(MySqlConnectOptions::new()
            .host(&self.host().await?)
            .port(self.port().await?)
            .username(&self.config.username)
            .password(&self.config.password)
            .database(&self.config.database))
    }

    /// Opens a pool for the application account.
    ///
    /// MySQL logs "ready for connections" once for the temporary init server
    /// too, so the first attempts may still be refused.
    pub async fn pool(&self) -> Result<MySqlPool> {
        let options = self.connect_options().await?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match MySqlPoolOptions::new()
                .max_connections(16)
                .connect_with(options.clone())
                .await
            {
                Ok(pool) => return Ok(pool),
                Err(source) if attempt >= CONNECT_ATTEMPTS => {
                    return Err(TestInfraError::NotReady {
                        attempts: attempt,
                        source,
                    })
                }
                Err(_) => tokio::time::sleep(CONNECT_BACKOFF).await,
            }
        }
    }
}
