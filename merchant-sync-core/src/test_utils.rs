//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ConfigurationService, MerchantAccountService, ServiceContext};
use crate::traits::{ConfigurationStore, MerchantAccountRepository};
use crate::types::{MerchantAccount, MerchantAccountInput, SettingsMap};

// ===== MockMerchantAccountRepository =====

pub struct MockMerchantAccountRepository {
    accounts: RwLock<Vec<MerchantAccount>>,
    /// 如果 Some，清除默认标记时返回此错误
    clear_error: RwLock<Option<String>>,
    /// 如果 Some，写入记录时返回此错误（清除步骤已执行后）
    write_error: RwLock<Option<String>>,
}

impl MockMerchantAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            clear_error: RwLock::new(None),
            write_error: RwLock::new(None),
        }
    }

    pub async fn set_clear_error(&self, err: Option<String>) {
        *self.clear_error.write().await = err;
    }

    pub async fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().await = err;
    }

    /// 绕过不变量检查直接写入（模拟历史数据）
    pub async fn seed(&self, accounts: Vec<MerchantAccount>) {
        self.accounts.write().await.extend(accounts);
    }

    /// 在副本上执行 清除 + 写入，全部成功后才提交
    async fn commit_with<F>(&self, is_default: bool, write: F) -> CoreResult<bool>
    where
        F: FnOnce(&mut Vec<MerchantAccount>) -> bool,
    {
        let mut store = self.accounts.write().await;
        let mut draft = store.clone();

        if is_default {
            if let Some(ref msg) = *self.clear_error.read().await {
                return Err(CoreError::PersistenceFailure(msg.clone()));
            }
            for account in draft.iter_mut() {
                account.is_default = false;
            }
        }

        if let Some(ref msg) = *self.write_error.read().await {
            return Err(CoreError::PersistenceFailure(msg.clone()));
        }

        let written = write(&mut draft);
        if written {
            *store = draft;
        }
        Ok(written)
    }
}

#[async_trait]
impl MerchantAccountRepository for MockMerchantAccountRepository {
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
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .filter(|a| a.is_default)
            .cloned()
            .collect())
    }

    async fn find_sync_enabled(&self) -> CoreResult<Vec<MerchantAccount>> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .filter(|a| a.sync_enabled)
            .cloned()
            .collect())
    }

    async fn clear_default(&self) -> CoreResult<u64> {
        if let Some(ref msg) = *self.clear_error.read().await {
            return Err(CoreError::PersistenceFailure(msg.clone()));
        }
        let mut cleared = 0;
        for account in self.accounts.write().await.iter_mut() {
            if account.is_default {
                account.is_default = false;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    async fn insert(&self, account: &MerchantAccount) -> CoreResult<()> {
        let account = account.clone();
        self.commit_with(account.is_default, move |draft| {
            draft.push(account);
            true
        })
        .await?;
        Ok(())
    }

    async fn replace(&self, account: &MerchantAccount) -> CoreResult<bool> {
        if self.find_by_id(&account.id).await?.is_none() {
            return Ok(false);
        }
        let account = account.clone();
        self.commit_with(account.is_default, move |draft| {
            match draft.iter_mut().find(|a| a.id == account.id) {
                Some(slot) => {
                    *slot = account;
                    true
                }
                None => false,
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let mut store = self.accounts.write().await;
        let before = store.len();
        store.retain(|a| a.id != id);
        Ok(store.len() != before)
    }
}

// ===== MockConfigurationStore =====

pub struct MockConfigurationStore {
    settings: RwLock<SettingsMap>,
    write_error: RwLock<Option<String>>,
}

impl MockConfigurationStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(HashMap::new()),
            write_error: RwLock::new(None),
        }
    }

    pub async fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().await = err;
    }

    async fn check_writable(&self) -> CoreResult<()> {
        match *self.write_error.read().await {
            Some(ref msg) => Err(CoreError::PersistenceFailure(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConfigurationStore for MockConfigurationStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.settings.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.check_writable().await?;
        self.settings
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> CoreResult<()> {
        self.check_writable().await?;
        let mut store = self.settings.write().await;
        for (key, value) in entries {
            store.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn load_all(&self) -> CoreResult<SettingsMap> {
        Ok(self.settings.read().await.clone())
    }
}

// ===== Factory functions =====

fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockConfigurationStore>,
    Arc<MockMerchantAccountRepository>,
) {
    let store = Arc::new(MockConfigurationStore::new());
    let repo = Arc::new(MockMerchantAccountRepository::new());
    let ctx = Arc::new(ServiceContext::new(store.clone(), repo.clone()));
    (ctx, store, repo)
}

/// 创建测试用 MerchantAccountService，返回服务和可操控的 mock
pub fn create_test_account_service() -> (MerchantAccountService, Arc<MockMerchantAccountRepository>)
{
    let (ctx, _, repo) = create_test_context();
    (MerchantAccountService::new(ctx), repo)
}

/// 创建测试用 ConfigurationService，返回服务和可操控的 mock
pub fn create_test_configuration_service() -> (ConfigurationService, Arc<MockConfigurationStore>) {
    let (ctx, store, _) = create_test_context();
    (ConfigurationService::new(ctx), store)
}

pub fn account_input(title: &str, merchant_id: &str, is_default: bool) -> MerchantAccountInput {
    MerchantAccountInput {
        title: title.to_string(),
        merchant_id: merchant_id.to_string(),
        language_id: 1,
        country_id: 64,
        currency_id: 1,
        is_default,
        sync_enabled: false,
    }
}

pub fn make_account(id: &str, is_default: bool) -> MerchantAccount {
    let now = Utc::now();
    MerchantAccount {
        id: id.to_string(),
        title: format!("Account {id}"),
        merchant_id: id.to_string(),
        language_id: 1,
        country_id: 64,
        currency_id: 1,
        is_default,
        sync_enabled: false,
        created_at: now,
        updated_at: now,
    }
}
