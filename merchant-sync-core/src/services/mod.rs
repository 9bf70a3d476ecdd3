//! 业务逻辑服务层

mod configuration_service;
mod merchant_account_service;

pub use configuration_service::ConfigurationService;
pub use merchant_account_service::MerchantAccountService;

use std::sync::Arc;

use crate::traits::{ConfigurationStore, MerchantAccountRepository};

/// 服务上下文 - 持有所有依赖
///
/// 宿主层创建一次此上下文，注入具体的存储实现，然后在各服务之间共享。
pub struct ServiceContext {
    configuration_store: Arc<dyn ConfigurationStore>,
    merchant_account_repository: Arc<dyn MerchantAccountRepository>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        configuration_store: Arc<dyn ConfigurationStore>,
        merchant_account_repository: Arc<dyn MerchantAccountRepository>,
    ) -> Self {
        Self {
            configuration_store,
            merchant_account_repository,
        }
    }

    pub fn configuration_store(&self) -> &Arc<dyn ConfigurationStore> {
        &self.configuration_store
    }

    pub fn merchant_account_repository(&self) -> &Arc<dyn MerchantAccountRepository> {
        &self.merchant_account_repository
    }
}
