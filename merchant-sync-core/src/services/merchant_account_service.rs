//! Merchant account registry
//!
//! Add, update and delete the merchant accounts products are synchronised to,
//! while keeping at most one of them flagged as the default target.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{MerchantAccount, MerchantAccountInput};

/// Merchant account service
pub struct MerchantAccountService {
    ctx: Arc<ServiceContext>,
}

impl MerchantAccountService {
    /// Create a merchant account service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    // ===== Queries =====

    /// List all accounts
    pub async fn list_accounts(&self) -> CoreResult<Vec<MerchantAccount>> {
        self.ctx.merchant_account_repository().find_all().await
    }

    /// Get account based on ID
    pub async fn get_account(&self, id: &str) -> CoreResult<Option<MerchantAccount>> {
        self.ctx.merchant_account_repository().find_by_id(id).await
    }

    /// The default account, if any
    ///
    /// Fails with `InvariantViolation` when the store holds several defaults;
    /// `clear_default` followed by an update repairs that state.
    pub async fn list_default(&self) -> CoreResult<Option<MerchantAccount>> {
        let mut defaults = self
            .ctx
            .merchant_account_repository()
            .find_defaults()
            .await?;

        match defaults.len() {
            0 | 1 => Ok(defaults.pop()),
            n => {
                let ids: Vec<&str> = defaults.iter().map(|a| a.id.as_str()).collect();
                log::error!("{n} merchant accounts flagged as default: {ids:?}");
                Err(CoreError::InvariantViolation(format!(
                    "{n} accounts are flagged as default"
                )))
            }
        }
    }

    /// Accounts the external synchroniser should push products to
    pub async fn list_sync_targets(&self) -> CoreResult<Vec<MerchantAccount>> {
        self.ctx
            .merchant_account_repository()
            .find_sync_enabled()
            .await
    }

    // ===== Mutations =====

    /// Add an account
    ///
    /// When the input is flagged default, every other default is cleared in the
    /// same atomic unit, clear first.
    pub async fn add_account(&self, input: MerchantAccountInput) -> CoreResult<MerchantAccount> {
        let input = input.validate()?;
        let account =
            MerchantAccount::from_input(uuid::Uuid::new_v4().to_string(), input, Utc::now());

        if let Err(e) = self
            .ctx
            .merchant_account_repository()
            .insert(&account)
            .await
        {
            log::error!("Failed to add merchant account {}: {e}", account.merchant_id);
            return Err(e);
        }

        log::info!(
            "Merchant account added: {} (merchant {}, default: {})",
            account.id,
            account.merchant_id,
            account.is_default
        );
        Ok(account)
    }

    /// Update account
    ///
    /// Replaces every business field and both flags. When the input is flagged
    /// default, the clear runs even if the target already was the default.
    /// An unknown id fails with `NotFound` and changes nothing.
    pub async fn update_account(
        &self,
        id: &str,
        input: MerchantAccountInput,
    ) -> CoreResult<MerchantAccount> {
        let input = input.validate()?;

        let mut account = self
            .ctx
            .merchant_account_repository()
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        account.apply(input, Utc::now());

        // The record may have been deleted between the read and the write.
        let replaced = match self
            .ctx
            .merchant_account_repository()
            .replace(&account)
            .await
        {
            Ok(replaced) => replaced,
            Err(e) => {
                log::error!("Failed to update merchant account {id}: {e}");
                return Err(e);
            }
        };
        if !replaced {
            log::warn!("Merchant account {id} disappeared before update");
            return Err(CoreError::NotFound(id.to_string()));
        }

        log::info!(
            "Merchant account updated: {id} (default: {}, sync: {})",
            account.is_default,
            account.sync_enabled
        );
        Ok(account)
    }

    /// Delete account
    ///
    /// A missing id is a no-op.
    pub async fn delete_account(&self, id: &str) -> CoreResult<()> {
        if self.ctx.merchant_account_repository().delete(id).await? {
            log::info!("Merchant account deleted: {id}");
        } else {
            log::debug!("Merchant account {id} already absent, nothing deleted");
        }
        Ok(())
    }

    /// Clear the default flag on every account
    ///
    /// Returns the number of flags cleared; calling it again returns 0.
    pub async fn clear_default(&self) -> CoreResult<u64> {
        let cleared = self
            .ctx
            .merchant_account_repository()
            .clear_default()
            .await?;
        if cleared > 0 {
            log::info!("Cleared default flag on {cleared} merchant account(s)");
        }
        Ok(cleared)
    }
}
