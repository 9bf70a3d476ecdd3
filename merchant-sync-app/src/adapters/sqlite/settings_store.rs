//! `ConfigurationStore` implementation for `SqliteStore`.
//!
//! Sensitive settings are sealed before storage when a password is configured.
//! Uses `merchant_sync_core::crypto::{seal, open_string}`.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, TransactionTrait};

use merchant_sync_core::crypto::{self, SealedValue};
use merchant_sync_core::error::{CoreError, CoreResult};
use merchant_sync_core::traits::ConfigurationStore;
use merchant_sync_core::types::settings::is_sensitive;
use merchant_sync_core::types::SettingsMap;

use super::entity::setting;
use super::{persistence, SqliteStore};

impl SqliteStore {
    /// Build the row for `key`, sealing the value if the key is sensitive.
    fn to_row(&self, key: &str, value: &str) -> CoreResult<setting::ActiveModel> {
        let sealed = match self.encryption_password.as_deref() {
            Some(password) if is_sensitive(key) => Some(crypto::seal(value.as_bytes(), password)?),
            None if is_sensitive(key) => {
                log::warn!("Storing {key} unsealed: no encryption password configured");
                None
            }
            _ => None,
        };

        Ok(match sealed {
            Some(sealed) => setting::ActiveModel {
                name: Set(key.to_string()),
                value: Set(sealed.ciphertext),
                salt: Set(Some(sealed.salt)),
                nonce: Set(Some(sealed.nonce)),
                seal_version: Set(Some(sealed.version)),
            },
            None => setting::ActiveModel {
                name: Set(key.to_string()),
                value: Set(value.to_string()),
                salt: Set(None),
                nonce: Set(None),
                seal_version: Set(None),
            },
        })
    }

    /// Read the clear-text value out of a row.
    fn open_row(&self, row: setting::Model) -> CoreResult<(String, String)> {
        let setting::Model {
            name,
            value,
            salt,
            nonce,
            seal_version,
        } = row;

        let (Some(salt), Some(nonce), Some(version)) = (salt, nonce, seal_version) else {
            return Ok((name, value));
        };

        let password = self.encryption_password.as_deref().ok_or_else(|| {
            CoreError::SecretError(format!(
                "Setting {name} is sealed but no encryption password is configured"
            ))
        })?;
        let sealed = SealedValue {
            salt,
            nonce,
            ciphertext: value,
            version,
        };
        let clear = crypto::open_string(&sealed, password)?;
        Ok((name, clear))
    }
}

async fn upsert<C: ConnectionTrait>(conn: &C, row: setting::ActiveModel) -> CoreResult<()> {
    setting::Entity::insert(row)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(setting::Column::Name)
                .update_columns([
                    setting::Column::Value,
                    setting::Column::Salt,
                    setting::Column::Nonce,
                    setting::Column::SealVersion,
                ])
                .to_owned(),
        )
        .exec(conn)
        .await
        .map_err(persistence("Failed to save setting"))?;
    Ok(())
}

#[async_trait]
impl ConfigurationStore for SqliteStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let row = setting::Entity::find_by_id(key)
            .one(&self.db)
            .await
            .map_err(persistence("Failed to query setting"))?;

        row.map(|r| self.open_row(r).map(|(_, value)| value))
            .transpose()
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let row = self.to_row(key, value)?;
        upsert(&self.db, row).await
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> CoreResult<()> {
        // Seal everything before the transaction opens.
        let rows = entries
            .iter()
            .map(|(key, value)| self.to_row(key, value))
            .collect::<CoreResult<Vec<_>>>()?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(persistence("Failed to begin transaction"))?;
        for row in rows {
            upsert(&txn, row).await?;
        }
        txn.commit()
            .await
            .map_err(persistence("Failed to commit settings"))?;

        log::debug!("Saved {} settings to SQLite", entries.len());
        Ok(())
    }

    async fn load_all(&self) -> CoreResult<SettingsMap> {
        let rows = setting::Entity::find()
            .all(&self.db)
            .await
            .map_err(persistence("Failed to query settings"))?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let name = row.name.clone();
            match self.open_row(row) {
                Ok((key, value)) => {
                    map.insert(key, value);
                }
                Err(e) => log::warn!("Skipping unreadable setting {name}: {e}"),
            }
        }
        Ok(map)
    }
}
