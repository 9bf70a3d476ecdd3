//! Storage layer abstraction trait definition

mod configuration_store;
mod merchant_account_repository;

pub use configuration_store::ConfigurationStore;
pub use merchant_account_repository::MerchantAccountRepository;
