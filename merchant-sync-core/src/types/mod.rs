//! 类型定义模块

mod merchant_account;
pub mod settings;

pub use merchant_account::{MerchantAccount, MerchantAccountInput};
pub use settings::{ApiConfiguration, MiscConfiguration, SettingsMap};
