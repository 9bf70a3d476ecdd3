//! `MerchantAccountRepository` implementation for `SqliteStore`.
//!
//! Every write that sets a default runs "clear, then write" in one
//! transaction. The partial unique index created by the migration rejects a
//! second default if anything bypasses this path.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use merchant_sync_core::error::{CoreError, CoreResult};
use merchant_sync_core::traits::MerchantAccountRepository;
use merchant_sync_core::types::MerchantAccount;

use super::entity::merchant_account;
use super::{persistence, SqliteStore};

/// Fixed-width RFC3339, so text order matches time order.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(field: &str, raw: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field}: {e}")))
}

impl merchant_account::Model {
    /// Convert a `SeaORM` row model into a domain `MerchantAccount`.
    fn into_account(self) -> CoreResult<MerchantAccount> {
        Ok(MerchantAccount {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            id: self.id,
            title: self.title,
            merchant_id: self.merchant_id,
            language_id: self.language_id,
            country_id: self.country_id,
            currency_id: self.currency_id,
            is_default: self.is_default,
            sync_enabled: self.sync_enabled,
        })
    }
}

/// Convert a domain `MerchantAccount` into a fully populated active model.
fn to_active_model(account: &MerchantAccount) -> merchant_account::ActiveModel {
    merchant_account::ActiveModel {
        id: Set(account.id.clone()),
        title: Set(account.title.clone()),
        merchant_id: Set(account.merchant_id.clone()),
        language_id: Set(account.language_id),
        country_id: Set(account.country_id),
        currency_id: Set(account.currency_id),
        is_default: Set(account.is_default),
        sync_enabled: Set(account.sync_enabled),
        created_at: Set(format_timestamp(&account.created_at)),
        updated_at: Set(format_timestamp(&account.updated_at)),
    }
}

async fn clear_defaults<C: ConnectionTrait>(conn: &C) -> CoreResult<u64> {
    let result = merchant_account::Entity::update_many()
        .col_expr(merchant_account::Column::IsDefault, Expr::value(false))
        .filter(merchant_account::Column::IsDefault.eq(true))
        .exec(conn)
        .await
        .map_err(persistence("Failed to clear default merchant account"))?;
    Ok(result.rows_affected)
}

fn into_accounts(rows: Vec<merchant_account::Model>) -> CoreResult<Vec<MerchantAccount>> {
    rows.into_iter()
        .map(merchant_account::Model::into_account)
        .collect()
}

#[async_trait]
impl MerchantAccountRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<MerchantAccount>> {
        let rows = merchant_account::Entity::find()
            .order_by_asc(merchant_account::Column::CreatedAt)
            .order_by_asc(merchant_account::Column::Id)
            .all(&self.db)
            .await
            .map_err(persistence("Failed to query merchant accounts"))?;
        into_accounts(rows)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<MerchantAccount>> {
        let row = merchant_account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(persistence("Failed to query merchant account"))?;

        row.map(merchant_account::Model::into_account).transpose()
    }

    async fn find_defaults(&self) -> CoreResult<Vec<MerchantAccount>> {
        let rows = merchant_account::Entity::find()
            .filter(merchant_account::Column::IsDefault.eq(true))
            .all(&self.db)
            .await
            .map_err(persistence("Failed to query default merchant account"))?;
        into_accounts(rows)
    }

    async fn find_sync_enabled(&self) -> CoreResult<Vec<MerchantAccount>> {
        let rows = merchant_account::Entity::find()
            .filter(merchant_account::Column::SyncEnabled.eq(true))
            .order_by_asc(merchant_account::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(persistence("Failed to query sync targets"))?;
        into_accounts(rows)
    }

    async fn clear_default(&self) -> CoreResult<u64> {
        clear_defaults(&self.db).await
    }

    async fn insert(&self, account: &MerchantAccount) -> CoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(persistence("Failed to begin transaction"))?;

        if account.is_default {
            clear_defaults(&txn).await?;
        }

        merchant_account::Entity::insert(to_active_model(account))
            .exec(&txn)
            .await
            .map_err(persistence("Failed to insert merchant account"))?;

        txn.commit()
            .await
            .map_err(persistence("Failed to commit merchant account"))?;
        Ok(())
    }

    async fn replace(&self, account: &MerchantAccount) -> CoreResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(persistence("Failed to begin transaction"))?;

        let existing = merchant_account::Entity::find_by_id(account.id.as_str())
            .one(&txn)
            .await
            .map_err(persistence("Failed to query merchant account"))?;
        if existing.is_none() {
            // dropping the transaction rolls it back
            return Ok(false);
        }

        if account.is_default {
            clear_defaults(&txn).await?;
        }

        to_active_model(account)
            .update(&txn)
            .await
            .map_err(persistence("Failed to update merchant account"))?;

        txn.commit()
            .await
            .map_err(persistence("Failed to commit merchant account"))?;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let result = merchant_account::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(persistence("Failed to delete merchant account"))?;
        Ok(result.rows_affected > 0)
    }
}
