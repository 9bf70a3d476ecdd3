#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `SqliteStore`: covers the `ConfigurationStore` and
//! `MerchantAccountRepository` trait implementations.

use merchant_sync_app::adapters::SqliteStore;
use merchant_sync_core::error::CoreError;
use merchant_sync_core::traits::{ConfigurationStore, MerchantAccountRepository};
use merchant_sync_core::types::settings::keys;
use merchant_sync_core::types::MerchantAccount;

// ===== Helpers =====

const TEST_PASSWORD: &str = "test-encryption-password-32chars!";

async fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let store = SqliteStore::new(&db_path, Some(TEST_PASSWORD.to_string()))
        .await
        .expect("failed to create SqliteStore");
    (store, tmp)
}

async fn create_test_store_no_password() -> (SqliteStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let store = SqliteStore::new(&db_path, None)
        .await
        .expect("failed to create SqliteStore");
    (store, tmp)
}

fn make_account(id: &str, is_default: bool) -> MerchantAccount {
    let now = chrono::Utc::now();
    MerchantAccount {
        id: id.to_string(),
        title: format!("Store {id}"),
        merchant_id: format!("10{id}"),
        language_id: 1,
        country_id: 64,
        currency_id: 1,
        is_default,
        sync_enabled: false,
        created_at: now,
        updated_at: now,
    }
}

async fn default_ids(store: &SqliteStore) -> Vec<String> {
    MerchantAccountRepository::find_defaults(store)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect()
}

// ===== ConfigurationStore Tests =====

#[tokio::test]
async fn setting_get_missing_is_none() {
    let (store, _tmp) = create_test_store().await;
    let value = ConfigurationStore::get(&store, "nonexistent_key")
        .await
        .unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn setting_set_then_get() {
    let (store, _tmp) = create_test_store().await;
    ConfigurationStore::set(&store, keys::CLIENT_ID, "abc")
        .await
        .unwrap();
    let value = ConfigurationStore::get(&store, keys::CLIENT_ID)
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some("abc"));
}

#[tokio::test]
async fn setting_set_overwrites() {
    let (store, _tmp) = create_test_store().await;
    ConfigurationStore::set(&store, keys::APPLICATION_NAME, "one")
        .await
        .unwrap();
    ConfigurationStore::set(&store, keys::APPLICATION_NAME, "two")
        .await
        .unwrap();

    let all = ConfigurationStore::load_all(&store).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[keys::APPLICATION_NAME], "two");
}

#[tokio::test]
async fn setting_set_many_writes_all() {
    let (store, _tmp) = create_test_store().await;
    ConfigurationStore::set_many(
        &store,
        &[
            (keys::CHECK_GTIN, "1"),
            (keys::ATTRIBUTE_COLOR, "3,4"),
            (keys::ATTRIBUTE_SIZE, ""),
        ],
    )
    .await
    .unwrap();

    let all = ConfigurationStore::load_all(&store).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[keys::ATTRIBUTE_COLOR], "3,4");
    assert_eq!(all[keys::ATTRIBUTE_SIZE], "");
}

#[tokio::test]
async fn sensitive_setting_roundtrips_through_seal() {
    let (store, _tmp) = create_test_store().await;
    ConfigurationStore::set(&store, keys::CLIENT_SECRET, "s3cr3t")
        .await
        .unwrap();

    let value = ConfigurationStore::get(&store, keys::CLIENT_SECRET)
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some("s3cr3t"));
}

#[tokio::test]
async fn sealed_setting_survives_reopen_and_needs_password() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("settings.db");

    {
        let store = SqliteStore::new(&db_path, Some(TEST_PASSWORD.to_string()))
            .await
            .unwrap();
        ConfigurationStore::set(&store, keys::SYNC_SECRET, "deadbeef")
            .await
            .unwrap();
        ConfigurationStore::set(&store, keys::CLIENT_ID, "plain")
            .await
            .unwrap();
    }

    let reopened = SqliteStore::new(&db_path, Some(TEST_PASSWORD.to_string()))
        .await
        .unwrap();
    assert_eq!(
        ConfigurationStore::get(&reopened, keys::SYNC_SECRET)
            .await
            .unwrap()
            .as_deref(),
        Some("deadbeef")
    );

    let without_password = SqliteStore::new(&db_path, None).await.unwrap();
    let result = ConfigurationStore::get(&without_password, keys::SYNC_SECRET).await;
    assert!(matches!(result, Err(CoreError::SecretError(_))));

    // load_all skips what it cannot open
    let all = ConfigurationStore::load_all(&without_password).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[keys::CLIENT_ID], "plain");
}

#[tokio::test]
async fn sensitive_setting_without_password_is_plain() {
    let (store, _tmp) = create_test_store_no_password().await;
    ConfigurationStore::set(&store, keys::CLIENT_SECRET, "visible")
        .await
        .unwrap();
    let value = ConfigurationStore::get(&store, keys::CLIENT_SECRET)
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some("visible"));
}

// ===== MerchantAccountRepository Tests =====

#[tokio::test]
async fn account_find_all_empty() {
    let (store, _tmp) = create_test_store().await;
    let accounts = MerchantAccountRepository::find_all(&store).await.unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn account_insert_and_find_by_id() {
    let (store, _tmp) = create_test_store().await;
    let account = make_account("a1", false);
    MerchantAccountRepository::insert(&store, &account)
        .await
        .unwrap();

    let found = MerchantAccountRepository::find_by_id(&store, "a1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.title, "Store a1");
    assert_eq!(found.merchant_id, "10a1");
    assert_eq!(found.country_id, 64);
    assert!(!found.is_default);
    assert_eq!(
        found.created_at.timestamp_micros(),
        account.created_at.timestamp_micros()
    );
}

#[tokio::test]
async fn account_find_by_id_not_found() {
    let (store, _tmp) = create_test_store().await;
    let found = MerchantAccountRepository::find_by_id(&store, "nonexistent")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn account_duplicate_id_is_persistence_failure() {
    let (store, _tmp) = create_test_store().await;
    let account = make_account("a1", false);
    MerchantAccountRepository::insert(&store, &account)
        .await
        .unwrap();
    let result = MerchantAccountRepository::insert(&store, &account).await;
    assert!(matches!(result, Err(CoreError::PersistenceFailure(_))));
}

#[tokio::test]
async fn account_insert_default_clears_previous_default() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("r1", true))
        .await
        .unwrap();
    MerchantAccountRepository::insert(&store, &make_account("r2", true))
        .await
        .unwrap();

    assert_eq!(default_ids(&store).await, vec!["r2".to_string()]);
    let r1 = MerchantAccountRepository::find_by_id(&store, "r1")
        .await
        .unwrap()
        .unwrap();
    assert!(!r1.is_default);
}

#[tokio::test]
async fn account_failed_insert_rolls_back_clear() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("r1", true))
        .await
        .unwrap();

    // same id again: the insert fails after the clear ran inside the transaction
    let result = MerchantAccountRepository::insert(&store, &make_account("r1", true)).await;
    assert!(result.is_err());

    assert_eq!(default_ids(&store).await, vec!["r1".to_string()]);
}

#[tokio::test]
async fn account_replace_existing() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("a1", false))
        .await
        .unwrap();

    let mut updated = make_account("a1", false);
    updated.title = "Renamed".to_string();
    updated.sync_enabled = true;
    let replaced = MerchantAccountRepository::replace(&store, &updated)
        .await
        .unwrap();
    assert!(replaced);

    let found = MerchantAccountRepository::find_by_id(&store, "a1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.title, "Renamed");
    assert!(found.sync_enabled);
}

#[tokio::test]
async fn account_replace_missing_changes_nothing() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("a1", true))
        .await
        .unwrap();

    let replaced = MerchantAccountRepository::replace(&store, &make_account("ghost", true))
        .await
        .unwrap();
    assert!(!replaced);
    assert_eq!(default_ids(&store).await, vec!["a1".to_string()]);
}

#[tokio::test]
async fn account_replace_default_onto_itself() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("a1", true))
        .await
        .unwrap();
    MerchantAccountRepository::insert(&store, &make_account("a2", false))
        .await
        .unwrap();

    assert!(
        MerchantAccountRepository::replace(&store, &make_account("a1", true))
            .await
            .unwrap()
    );
    assert_eq!(default_ids(&store).await, vec!["a1".to_string()]);

    assert!(
        MerchantAccountRepository::replace(&store, &make_account("a2", true))
            .await
            .unwrap()
    );
    assert_eq!(default_ids(&store).await, vec!["a2".to_string()]);
}

#[tokio::test]
async fn account_delete_is_idempotent() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("a1", false))
        .await
        .unwrap();

    assert!(MerchantAccountRepository::delete(&store, "a1").await.unwrap());
    assert!(!MerchantAccountRepository::delete(&store, "a1").await.unwrap());
    assert!(MerchantAccountRepository::find_all(&store)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn account_clear_default_counts() {
    let (store, _tmp) = create_test_store().await;
    MerchantAccountRepository::insert(&store, &make_account("a1", true))
        .await
        .unwrap();

    assert_eq!(
        MerchantAccountRepository::clear_default(&store)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        MerchantAccountRepository::clear_default(&store)
            .await
            .unwrap(),
        0
    );
    assert!(default_ids(&store).await.is_empty());
}

#[tokio::test]
async fn account_find_sync_enabled() {
    let (store, _tmp) = create_test_store().await;
    let mut synced = make_account("s1", false);
    synced.sync_enabled = true;
    MerchantAccountRepository::insert(&store, &synced)
        .await
        .unwrap();
    MerchantAccountRepository::insert(&store, &make_account("n1", false))
        .await
        .unwrap();

    let targets = MerchantAccountRepository::find_sync_enabled(&store)
        .await
        .unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].id, "s1");
}

#[tokio::test]
async fn account_find_all_oldest_first() {
    let (store, _tmp) = create_test_store().await;
    let mut older = make_account("zzz", false);
    older.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
    MerchantAccountRepository::insert(&store, &make_account("aaa", false))
        .await
        .unwrap();
    MerchantAccountRepository::insert(&store, &older)
        .await
        .unwrap();

    let ids: Vec<String> = MerchantAccountRepository::find_all(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec!["zzz".to_string(), "aaa".to_string()]);
}
