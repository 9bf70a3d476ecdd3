//! 商户账户相关类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A merchant account the catalog is synchronised to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAccount {
    /// Account ID (UUID)
    pub id: String,
    /// Display title shown in the admin list
    pub title: String,
    /// Identifier of the account on the shopping-ads side
    pub merchant_id: String,
    pub language_id: i64,
    pub country_id: i64,
    pub currency_id: i64,
    /// Fallback target for synchronisation; at most one account carries it
    pub is_default: bool,
    pub sync_enabled: bool,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl MerchantAccount {
    /// Build a fresh record from a validated input
    pub(crate) fn from_input(id: String, input: MerchantAccountInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            merchant_id: input.merchant_id,
            language_id: input.language_id,
            country_id: input.country_id,
            currency_id: input.currency_id,
            is_default: input.is_default,
            sync_enabled: input.sync_enabled,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every business field and flag, keeping identity and creation time
    pub(crate) fn apply(&mut self, input: MerchantAccountInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.merchant_id = input.merchant_id;
        self.language_id = input.language_id;
        self.country_id = input.country_id;
        self.currency_id = input.currency_id;
        self.is_default = input.is_default;
        self.sync_enabled = input.sync_enabled;
        self.updated_at = now;
    }
}

/// Add / update payload for a merchant account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAccountInput {
    pub title: String,
    pub merchant_id: String,
    pub language_id: i64,
    pub country_id: i64,
    pub currency_id: i64,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub sync_enabled: bool,
}

impl MerchantAccountInput {
    /// Reject structurally incomplete input.
    ///
    /// Surrounding whitespace is trimmed from the text fields.
    pub fn validate(mut self) -> CoreResult<Self> {
        self.title = self.title.trim().to_string();
        self.merchant_id = self.merchant_id.trim().to_string();

        if self.title.is_empty() {
            return Err(CoreError::invalid_account("title", "must not be blank"));
        }
        if self.merchant_id.is_empty() {
            return Err(CoreError::invalid_account("merchantId", "must not be blank"));
        }
        if self.merchant_id.chars().any(char::is_whitespace) {
            return Err(CoreError::invalid_account(
                "merchantId",
                "must not contain whitespace",
            ));
        }

        for (field, value) in [
            ("languageId", self.language_id),
            ("countryId", self.country_id),
            ("currencyId", self.currency_id),
        ] {
            if value <= 0 {
                return Err(CoreError::invalid_account(field, "must be a positive id"));
            }
        }

        Ok(self)
    }
}
