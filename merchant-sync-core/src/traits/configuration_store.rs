//! 配置存储抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::SettingsMap;

/// Key/value settings store
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`, sensitive keys sealed at rest)
/// - `MemoryStore` (tests, ephemeral hosts)
///
/// Writes are last-write-wins. The store does no validation; services validate
/// before calling it.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Read a setting
    ///
    /// # Returns
    /// * `Ok(Some(value))` - setting present
    /// * `Ok(None)` - never set
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Upsert a setting
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Upsert several settings as one atomic unit
    ///
    /// Either every entry is written or none is.
    async fn set_many(&self, entries: &[(&str, &str)]) -> CoreResult<()>;

    /// Read every setting
    async fn load_all(&self) -> CoreResult<SettingsMap>;
}
