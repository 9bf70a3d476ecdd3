//! Merchant account persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::MerchantAccount;

/// Merchant account repository Trait
///
/// Implementations own the "at most one default" invariant: whenever a record
/// is written with `is_default = true`, every existing default flag is cleared
/// first, and the clear and the write form a single atomic unit. A failed clear
/// aborts the write.
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM` transaction + partial unique index)
/// - `MemoryStore` (single write lock)
#[async_trait]
pub trait MerchantAccountRepository: Send + Sync {
    /// Get all accounts, oldest first
    async fn find_all(&self) -> CoreResult<Vec<MerchantAccount>>;

    /// Get account based on ID
    ///
    /// # Arguments
    /// * `id` - Account ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<MerchantAccount>>;

    /// Get every account flagged as default
    ///
    /// Returns more than one record only if the invariant was broken outside
    /// this repository (legacy data, manual edits).
    async fn find_defaults(&self) -> CoreResult<Vec<MerchantAccount>>;

    /// Get every account with synchronisation enabled
    async fn find_sync_enabled(&self) -> CoreResult<Vec<MerchantAccount>>;

    /// Clear the default flag on every account
    ///
    /// Idempotent and safe to retry. Returns the number of flags cleared.
    async fn clear_default(&self) -> CoreResult<u64>;

    /// Insert a new account
    ///
    /// If `account.is_default`, clears every existing default in the same unit, before the insert.
    async fn insert(&self, account: &MerchantAccount) -> CoreResult<()>;

    /// Replace an existing account
    ///
    /// The existence check, the clear (if `account.is_default`) and the write
    /// form one unit. Returns `false` and changes nothing when no record with
    /// `account.id` exists.
    async fn replace(&self, account: &MerchantAccount) -> CoreResult<bool>;

    /// Delete account
    ///
    /// Returns whether a record was removed; a missing id is not an error.
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
