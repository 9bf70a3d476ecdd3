//! Command handlers. Each one returns the JSON document to print.

mod account;
mod config;
mod secret;

pub use account::handle_account_command;
pub use config::handle_config_command;
pub use secret::handle_secret_command;

use merchant_sync_app::AppState;
use serde_json::{json, Value};

/// Run the startup checks and describe the result
pub async fn handle_status(state: &AppState) -> anyhow::Result<Value> {
    let report = state.run_startup().await?;
    Ok(json!({
        "apiConfigured": report.api_configured,
        "syncTargets": report.sync_targets,
        "defaultInvariantOk": report.default_invariant_ok,
    }))
}
