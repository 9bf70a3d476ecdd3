//! Merchant Sync Core Library
//!
//! Provides the core business logic behind the shopping-feed administration screens:
//! - Configuration Service (API credentials, sync secret, attribute mapping)
//! - Merchant Account Service (the registry of synchronisation targets)
//!
//! This library is storage independent. Persistence is abstracted through traits,
//! so hosts inject whichever adapters fit them (SQLite, in-memory, ...).

pub mod crypto;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{ConfigurationStore, MerchantAccountRepository};
