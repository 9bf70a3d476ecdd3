use merchant_sync_app::AppState;
use merchant_sync_core::types::settings::is_sensitive;
use merchant_sync_core::types::{ApiConfiguration, MiscConfiguration, SettingsMap};
use serde_json::{json, Value};

use crate::cli::{ApiCommands, ConfigCommands, MiscCommands};

const MASK: &str = "********";

fn mask(value: &str) -> &str {
    if value.is_empty() {
        value
    } else {
        MASK
    }
}

/// Copy of `settings` safe to print
fn masked(settings: SettingsMap) -> SettingsMap {
    settings
        .into_iter()
        .map(|(key, value)| {
            let value = if is_sensitive(&key) {
                mask(&value).to_string()
            } else {
                value
            };
            (key, value)
        })
        .collect()
}

fn api_view(config: &ApiConfiguration) -> Value {
    json!({
        "clientId": config.client_id,
        "clientSecret": mask(&config.client_secret),
        "applicationName": config.application_name,
        "configured": config.is_complete(),
    })
}

pub async fn handle_config_command(cmd: ConfigCommands, state: &AppState) -> anyhow::Result<Value> {
    let svc = &state.configuration_service;
    match cmd {
        ConfigCommands::Get { key } => {
            let value = svc.get_or_empty(&key).await?;
            let value = if is_sensitive(&key) {
                mask(&value).to_string()
            } else {
                value
            };
            Ok(json!({ key: value }))
        }
        ConfigCommands::Set { key, value } => {
            svc.set(&key, &value).await?;
            Ok(json!({ "saved": key }))
        }
        ConfigCommands::Show => {
            Ok(masked(svc.load_all().await?)
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<serde_json::Map<_, _>>()
                .into())
        }
        ConfigCommands::Api { command: None } => Ok(api_view(&svc.api_configuration().await?)),
        ConfigCommands::Api {
            command:
                Some(ApiCommands::Set {
                    client_id,
                    client_secret,
                    application_name,
                }),
        } => {
            let config = ApiConfiguration {
                client_id,
                client_secret,
                application_name,
            };
            svc.save_api_configuration(&config).await?;
            Ok(api_view(&config))
        }
        ConfigCommands::Misc { command: None } => {
            Ok(serde_json::to_value(svc.misc_configuration().await?)?)
        }
        ConfigCommands::Misc {
            command:
                Some(MiscCommands::Set {
                    check_gtin,
                    attribute_color,
                    attribute_size,
                }),
        } => {
            let config = MiscConfiguration {
                check_gtin,
                attribute_color,
                attribute_size,
            };
            svc.save_misc_configuration(&config).await?;
            Ok(serde_json::to_value(config)?)
        }
    }
}
