//! Application bootstrap for Merchant Sync.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection)
//! and the storage adapters hosts can pick from.

pub mod adapters;

use std::sync::Arc;

use merchant_sync_core::error::{CoreError, CoreResult};
use merchant_sync_core::services::{ConfigurationService, MerchantAccountService, ServiceContext};
use merchant_sync_core::traits::{ConfigurationStore, MerchantAccountRepository};

/// Result of the startup checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// Whether every API credential is configured
    pub api_configured: bool,
    /// Number of accounts flagged for synchronisation
    pub sync_targets: usize,
    /// Whether the stored accounts honour the single-default rule
    pub default_invariant_ok: bool,
}

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every host constructs this
/// once at startup via `AppStateBuilder` and passes it by reference.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    /// Settings service
    pub configuration_service: Arc<ConfigurationService>,
    /// Merchant account registry
    pub merchant_account_service: Arc<MerchantAccountService>,
}

impl AppState {
    /// Run the startup sequence: make sure a sync secret exists, then check the stored state.
    ///
    /// A broken default invariant is reported, not repaired; repairing it
    /// is an admin decision.
    pub async fn run_startup(&self) -> CoreResult<StartupReport> {
        self.configuration_service.ensure_sync_secret().await?;

        let api_configured = self.configuration_service.is_api_configured().await?;
        if !api_configured {
            log::warn!("API credentials are not configured yet");
        }

        let default_invariant_ok = match self.merchant_account_service.list_default().await {
            Ok(_) => true,
            Err(CoreError::InvariantViolation(msg)) => {
                log::error!("Merchant account registry needs repair: {msg}");
                false
            }
            Err(e) => return Err(e),
        };

        let sync_targets = self
            .merchant_account_service
            .list_sync_targets()
            .await?
            .len();
        log::info!("Startup complete: {sync_targets} merchant account(s) enabled for sync");

        Ok(StartupReport {
            api_configured,
            sync_targets,
            default_invariant_ok,
        })
    }
}

/// Builder for constructing `AppState` with host-specific adapters.
///
/// # Required adapters
/// - `configuration_store`: where settings live
/// - `merchant_account_repository`: where merchant accounts live
pub struct AppStateBuilder {
    configuration_store: Option<Arc<dyn ConfigurationStore>>,
    merchant_account_repository: Option<Arc<dyn MerchantAccountRepository>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            configuration_store: None,
            merchant_account_repository: None,
        }
    }

    #[must_use]
    pub fn configuration_store(mut self, store: Arc<dyn ConfigurationStore>) -> Self {
        self.configuration_store = Some(store);
        self
    }

    #[must_use]
    pub fn merchant_account_repository(mut self, repo: Arc<dyn MerchantAccountRepository>) -> Self {
        self.merchant_account_repository = Some(repo);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let configuration_store = self.configuration_store.ok_or_else(|| {
            CoreError::ValidationError("configuration_store is required".to_string())
        })?;
        let merchant_account_repository = self.merchant_account_repository.ok_or_else(|| {
            CoreError::ValidationError("merchant_account_repository is required".to_string())
        })?;

        let ctx = Arc::new(ServiceContext::new(
            configuration_store,
            merchant_account_repository,
        ));

        Ok(AppState {
            configuration_service: Arc::new(ConfigurationService::new(Arc::clone(&ctx))),
            merchant_account_service: Arc::new(MerchantAccountService::new(Arc::clone(&ctx))),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
