use merchant_sync_app::AppState;
use serde_json::{json, Value};

use crate::cli::SecretCommands;

pub async fn handle_secret_command(cmd: SecretCommands, state: &AppState) -> anyhow::Result<Value> {
    let svc = &state.configuration_service;
    match cmd {
        SecretCommands::Ensure => Ok(json!({ "syncSecret": svc.ensure_sync_secret().await? })),
        SecretCommands::Rotate => {
            let secret = svc.rotate_sync_secret().await?;
            tracing::info!("Sync secret rotated, update the synchronisation trigger");
            Ok(json!({ "syncSecret": secret }))
        }
        SecretCommands::Verify { candidate } => {
            Ok(json!({ "valid": svc.verify_sync_secret(&candidate).await? }))
        }
    }
}
