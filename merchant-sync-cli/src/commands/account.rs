use merchant_sync_app::AppState;
use merchant_sync_core::error::CoreError;
use serde_json::{json, Value};

use crate::cli::AccountCommands;

pub async fn handle_account_command(
    cmd: AccountCommands,
    state: &AppState,
) -> anyhow::Result<Value> {
    let svc = &state.merchant_account_service;
    let value = match cmd {
        AccountCommands::List => serde_json::to_value(svc.list_accounts().await?)?,
        AccountCommands::Get { id } => {
            let account = svc
                .get_account(&id)
                .await?
                .ok_or(CoreError::NotFound(id))?;
            serde_json::to_value(account)?
        }
        AccountCommands::Add { fields } => serde_json::to_value(svc.add_account(fields.into()).await?)?,
        AccountCommands::Update { id, fields } => {
            serde_json::to_value(svc.update_account(&id, fields.into()).await?)?
        }
        AccountCommands::Delete { id } => {
            svc.delete_account(&id).await?;
            json!({ "deleted": id })
        }
        AccountCommands::Default => serde_json::to_value(svc.list_default().await?)?,
        AccountCommands::SyncTargets => serde_json::to_value(svc.list_sync_targets().await?)?,
        AccountCommands::ClearDefault => json!({ "cleared": svc.clear_default().await? }),
    };
    Ok(value)
}
