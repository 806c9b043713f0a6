mod cli;
mod telemetry;

use std::sync::Arc;

use crate::cli::{Command, InitStorageArgs, RunArgs, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use linkshelf_core::LinkStorage;
use linkshelf_gateway::{App, AppState};
use linkshelf_storage::schema;
use linkshelf_storage::{InMemoryLinkStorage, MySqlLinkStorage};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init_tracing(config.log_format)?;

    match config.command {
        Command::Run(args) => run(args).await,
        Command::InitStorage(args) => init_storage(args).await,
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    info!(
        listen_addr = %args.listen_addr,
        storage_backend = %args.storage,
        "starting linkshelf"
    );

    let storage: Arc<dyn LinkStorage> = match args.storage {
        StorageBackendArg::InMemory => {
            warn!("links are kept in memory and are lost when the process exits");
            Arc::new(InMemoryLinkStorage::new())
        }
        StorageBackendArg::Mysql => {
            let settings = args.mysql.settings()?;
            let storage = MySqlLinkStorage::connect(settings.connect_options())
                .await
                .with_context(|| {
                    format!(
                        "failed to connect to mysql at {}:{}",
                        settings.host, settings.port
                    )
                })?;
            Arc::new(storage)
        }
    };

    let state = AppState::new(storage).context("failed to register metrics")?;
    let listener = TcpListener::bind(args.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_addr))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn init_storage(args: InitStorageArgs) -> anyhow::Result<()> {
    let mode = args.mode()?;
    let settings = args.mysql.settings()?;

    info!(database = %settings.database, ?mode, "initializing storage");
    schema::init_storage(&settings, mode)
        .await
        .context("failed to initialize storage")?;

    info!("storage initialized");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
