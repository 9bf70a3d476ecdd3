//! Configuration service
//!
//! Typed access to the settings the admin screens edit: API credentials,
//! the synchronisation secret and the attribute mapping options.

use std::sync::Arc;

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::settings::{self, keys};
use crate::types::{ApiConfiguration, MiscConfiguration, SettingsMap};

const SYNC_SECRET_BYTES: usize = 32;

/// Configuration service
pub struct ConfigurationService {
    ctx: Arc<ServiceContext>,
}

impl ConfigurationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== Raw access =====

    /// Read a setting, `None` if never set
    pub async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.ctx.configuration_store().get(key).await
    }

    /// Read a setting, empty string if never set
    pub async fn get_or_empty(&self, key: &str) -> CoreResult<String> {
        Ok(self.get(key).await?.unwrap_or_default())
    }

    /// Upsert a setting
    pub async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.ctx.configuration_store().set(key, value).await?;
        log::info!("Setting updated: {key}");
        Ok(())
    }

    /// Every stored setting, secrets included
    pub async fn load_all(&self) -> CoreResult<SettingsMap> {
        self.ctx.configuration_store().load_all().await
    }

    // ===== API credentials =====

    pub async fn api_configuration(&self) -> CoreResult<ApiConfiguration> {
        Ok(ApiConfiguration {
            client_id: self.get_or_empty(keys::CLIENT_ID).await?,
            client_secret: self.get_or_empty(keys::CLIENT_SECRET).await?,
            application_name: self.get_or_empty(keys::APPLICATION_NAME).await?,
        })
    }

    /// Store the API credentials; blank fields are rejected and nothing is written
    pub async fn save_api_configuration(&self, config: &ApiConfiguration) -> CoreResult<()> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected API configuration: {e}");
            return Err(e);
        }

        let entries = config.entries().map(|(key, value)| (key, value.trim()));
        self.ctx.configuration_store().set_many(&entries).await?;

        log::info!("API configuration saved for client {}", config.client_id.trim());
        Ok(())
    }

    /// Whether every API credential is present
    pub async fn is_api_configured(&self) -> CoreResult<bool> {
        Ok(self.api_configuration().await?.is_complete())
    }

    // ===== Attribute mapping =====

    pub async fn misc_configuration(&self) -> CoreResult<MiscConfiguration> {
        let check_gtin = self.get_or_empty(keys::CHECK_GTIN).await?;
        let color = self.get_or_empty(keys::ATTRIBUTE_COLOR).await?;
        let size = self.get_or_empty(keys::ATTRIBUTE_SIZE).await?;

        Ok(MiscConfiguration {
            check_gtin: settings::decode_flag(&check_gtin),
            attribute_color: settings::decode_id_list(keys::ATTRIBUTE_COLOR, &color)?,
            attribute_size: settings::decode_id_list(keys::ATTRIBUTE_SIZE, &size)?,
        })
    }

    pub async fn save_misc_configuration(&self, config: &MiscConfiguration) -> CoreResult<()> {
        let color = settings::encode_id_list(&config.attribute_color);
        let size = settings::encode_id_list(&config.attribute_size);

        self.ctx
            .configuration_store()
            .set_many(&[
                (keys::CHECK_GTIN, settings::encode_flag(config.check_gtin)),
                (keys::ATTRIBUTE_COLOR, color.as_str()),
                (keys::ATTRIBUTE_SIZE, size.as_str()),
            ])
            .await?;

        log::info!("Attribute mapping configuration saved");
        Ok(())
    }

    // ===== Sync secret =====

    /// The stored sync secret, `None` if absent or blank
    pub async fn sync_secret(&self) -> CoreResult<Option<String>> {
        Ok(self
            .get(keys::SYNC_SECRET)
            .await?
            .filter(|s| !s.trim().is_empty()))
    }

    /// Return the sync secret, generating one on first use
    pub async fn ensure_sync_secret(&self) -> CoreResult<String> {
        if let Some(secret) = self.sync_secret().await? {
            return Ok(secret);
        }
        let secret = generate_secret();
        self.ctx
            .configuration_store()
            .set(keys::SYNC_SECRET, &secret)
            .await?;
        log::info!("Sync secret generated");
        Ok(secret)
    }

    /// Replace the sync secret with a fresh one
    pub async fn rotate_sync_secret(&self) -> CoreResult<String> {
        let secret = generate_secret();
        self.ctx
            .configuration_store()
            .set(keys::SYNC_SECRET, &secret)
            .await?;
        log::info!("Sync secret rotated");
        Ok(secret)
    }

    /// Check a secret presented by the synchronisation trigger
    ///
    /// Always false when no secret is stored.
    pub async fn verify_sync_secret(&self, candidate: &str) -> CoreResult<bool> {
        let Some(secret) = self.sync_secret().await? else {
            return Ok(false);
        };
        // digests have a fixed length, so the comparison does not leak the secret's
        Ok(Sha256::digest(secret.as_bytes()) == Sha256::digest(candidate.as_bytes()))
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; SYNC_SECRET_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
