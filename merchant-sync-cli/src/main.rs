//! Admin command line for Merchant Sync
//!
//! Opens the SQLite store, builds the `AppState` and runs one command.
//! Results go to stdout as JSON, logs go to stderr.

mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use merchant_sync_app::adapters::SqliteStore;
use merchant_sync_app::{AppState, AppStateBuilder};
use merchant_sync_core::error::CoreError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};

/// Exit status for errors the caller can fix (bad input, unknown id)
const EXIT_CALLER_ERROR: u8 = 2;
const EXIT_SYSTEM_ERROR: u8 = 1;

fn default_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine data directory, pass --db-path"))?;
    Ok(data_dir.join("merchant-sync").join("merchant-sync.db"))
}

async fn open_state(cli: &Cli) -> anyhow::Result<AppState> {
    let db_path = match &cli.db_path {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };
    if cli.encryption_key.is_none() {
        tracing::warn!("No encryption key set, secrets will be stored in clear text");
    }

    let store = Arc::new(SqliteStore::new(&db_path, cli.encryption_key.clone()).await?);
    let state = AppStateBuilder::new()
        .configuration_store(store.clone())
        .merchant_account_repository(store)
        .build()?;
    Ok(state)
}

async fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let state = open_state(&cli).await?;
    match cli.command {
        Commands::Status => commands::handle_status(&state).await,
        Commands::Config { command } => commands::handle_config_command(command, &state).await,
        Commands::Secret { command } => commands::handle_secret_command(command, &state).await,
        Commands::Account { command } => commands::handle_account_command(command, &state).await,
    }
}

fn exit_status_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<CoreError>() {
        Some(e) if e.is_expected() => EXIT_CALLER_ERROR,
        _ => EXIT_SYSTEM_ERROR,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the JSON result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match run(cli).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Failed to render output: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_status_for(&e))
        }
    }
}
