//! `SeaORM` entities backing `SqliteStore`.

pub mod merchant_account;
pub mod setting;
