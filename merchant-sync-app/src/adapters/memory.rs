//! In-memory store for tests and throwaway hosts.
//!
//! Implements `ConfigurationStore` and `MerchantAccountRepository`. Every
//! "clear defaults, then write" sequence runs under one write guard, so no
//! reader ever observes the intermediate state.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use merchant_sync_core::error::CoreResult;
use merchant_sync_core::traits::{ConfigurationStore, MerchantAccountRepository};
use merchant_sync_core::types::{MerchantAccount, SettingsMap};

/// Volatile store, contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    settings: RwLock<SettingsMap>,
    /// Insertion order doubles as creation order
    accounts: RwLock<Vec<MerchantAccount>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(HashMap::new()),
            accounts: RwLock::new(Vec::new()),
        }
    }
}

fn clear_defaults(accounts: &mut [MerchantAccount]) -> u64 {
    let mut cleared = 0;
    for account in accounts.iter_mut().filter(|a| a.is_default) {
        account.is_default = false;
        cleared += 1;
    }
    cleared
}

#[async_trait]
impl ConfigurationStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.settings
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> CoreResult<()> {
        let mut settings = self.settings.write().await;
        for (key, value) in entries {
            settings.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn load_all(&self) -> CoreResult<SettingsMap> {
        Ok(self.settings.read().await.clone())
    }
}

#[async_trait]
impl MerchantAccountRepository for MemoryStore {
    async fn find_all(&self) -> CoreResult<Vec<MerchantAccount>> {
        Ok(self.accounts.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<MerchantAccount>> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_defaults(&self) -> CoreResult<Vec<MerchantAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().filter(|a| a.is_default).cloned().collect())
    }

    async fn find_sync_enabled(&self) -> CoreResult<Vec<MerchantAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().filter(|a| a.sync_enabled).cloned().collect())
    }

    async fn clear_default(&self) -> CoreResult<u64> {
        Ok(clear_defaults(&mut self.accounts.write().await))
    }

    async fn insert(&self, account: &MerchantAccount) -> CoreResult<()> {
        let mut accounts = self.accounts.write().await;
        if account.is_default {
            clear_defaults(&mut accounts);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn replace(&self, account: &MerchantAccount) -> CoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        let Some(index) = accounts.iter().position(|a| a.id == account.id) else {
            return Ok(false);
        };
        if account.is_default {
            clear_defaults(&mut accounts);
        }
        accounts[index] = account.clone();
        Ok(true)
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        Ok(accounts.len() != before)
    }
}
