//! End-to-end vault coverage over the SQLCipher entry store.
//!
//! These tests exercise the full operation set through `VaultService`
//! against a real encrypted database, so scoping, upsert semantics, and
//! timestamp handling stay aligned with the storage layer. Each test
//! operates on an isolated database file.

use std::sync::Arc;

use lockbox_core::VaultService;
use lockbox_domain::{Accessibility, EntryError, VaultConfig, VaultEntry, VaultError};
use lockbox_infra::database::{DbManager, SqlCipherEntryStore};
use lockbox_infra::security::SecureString;
use tempfile::TempDir;

const TEST_DB_KEY: &str = "test_key_64_chars_long_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

struct VaultHarness {
    #[allow(dead_code)]
    temp_dir: TempDir,
    manager: Arc<DbManager>,
}

impl VaultHarness {
    fn new() -> Self {
        // Ignore the error when a prior test already installed a subscriber
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let db_path = temp_dir.path().join("vault-integration.db");

        let manager = Arc::new(
            DbManager::new(&db_path, 4, SecureString::from(TEST_DB_KEY))
                .expect("database manager should initialise"),
        );
        manager.run_migrations().expect("schema migrations should apply");

        Self { temp_dir, manager }
    }

    fn service(&self, config: VaultConfig) -> VaultService {
        let store = SqlCipherEntryStore::new(Arc::clone(&self.manager), config);
        VaultService::new(Arc::new(store))
    }

    fn default_service(&self) -> VaultService {
        self.service(VaultConfig::new("com.lockbox.tests").expect("config should be valid"))
    }
}

fn make_entry(key: &str, suffix: &str) -> VaultEntry {
    VaultEntry::new(key)
        .expect("key should be valid")
        .with_account(format!("account{suffix}"))
        .with_label(format!("label{suffix}"))
        .with_description(format!("this is the description{suffix}"))
        .with_notes(format!("this is the comment{suffix}"))
        .with_secret(format!("this is the data{suffix}").into_bytes())
}

// Config validation

#[test]
fn blank_service_name_is_rejected() {
    let result = VaultConfig::new(" \t\r\n");
    assert!(matches!(result, Err(VaultError::InvalidServiceName)));
}

#[test]
fn blank_access_group_is_rejected() {
    let result = VaultConfig::with_options(
        "com.lockbox.tests",
        Some(" \r\n\t "),
        Accessibility::default(),
    );
    assert!(matches!(result, Err(VaultError::InvalidAccessGroup)));
}

#[test]
fn blank_entry_key_is_rejected() {
    let result = VaultEntry::new(" \r\n\t  ");
    assert!(matches!(result, Err(EntryError::InvalidKey)));
}

// put() and entry()

#[tokio::test(flavor = "multi_thread")]
async fn set_new_and_get() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    let expected = make_entry("key1", "1");

    // There should be no entry for this key yet
    let found = vault.entry("key1").await.expect("lookup should succeed");
    assert!(found.is_none());

    vault.put(expected.clone()).await.expect("put should succeed");

    let actual = vault
        .entry_with_secret("key1")
        .await
        .expect("lookup should succeed")
        .expect("entry should exist");

    // Identifying attributes and the payload both round-trip
    assert_eq!(actual, expected);
    assert_eq!(actual.secret, expected.secret);
    assert_eq!(actual.notes, expected.notes);
    assert!(actual.created_at > 0);
    assert!(actual.modified_at >= actual.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_existing_updates_in_place() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.put(make_entry("key1", "1")).await.expect("put should succeed");
    assert_eq!(vault.entries().await.expect("list should succeed").len(), 1);

    // Re-put under the same key with modified attributes
    let modified = make_entry("key1", "2");
    vault.put(modified.clone()).await.expect("update should succeed");

    let entries = vault.entries().await.expect("list should succeed");
    assert_eq!(entries.len(), 1, "update must not create a second entry");

    let actual = vault
        .entry_with_secret("key1")
        .await
        .expect("lookup should succeed")
        .expect("entry should exist");
    assert_eq!(actual, modified);
    assert_eq!(actual.secret, modified.secret);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_same_entry_twice_keeps_one_entry() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    let entry = make_entry("key1", "1");
    vault.put(entry.clone()).await.expect("put should succeed");
    vault.put(entry.clone()).await.expect("re-put should succeed");

    let entries = vault.entries().await.expect("list should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], entry);
}

#[tokio::test(flavor = "multi_thread")]
async fn lookup_without_secret_is_cheap() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.put(make_entry("key1", "1")).await.expect("put should succeed");

    let entry = vault
        .entry("key1")
        .await
        .expect("lookup should succeed")
        .expect("entry should exist");
    assert!(entry.secret.is_none(), "secret payload should be omitted by default");
}

// contains()

#[tokio::test(flavor = "multi_thread")]
async fn contains_reports_presence() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    assert!(!vault.contains("key1").await.expect("contains should succeed"));

    vault.put(make_entry("key1", "1")).await.expect("put should succeed");

    assert!(vault.contains("key1").await.expect("contains should succeed"));
}

// entries()

#[tokio::test(flavor = "multi_thread")]
async fn list_on_empty_vault_is_empty() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    let entries = vault.entries().await.expect("list should succeed");
    assert!(entries.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_entries_in_creation_order() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    let entry1 = make_entry("key1", "1");
    let entry2 = make_entry("key2", "2");
    vault.put(entry1.clone()).await.expect("put should succeed");
    vault.put(entry2.clone()).await.expect("put should succeed");

    let entries = vault.entries().await.expect("list should succeed");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entry1);
    assert_eq!(entries[1], entry2);
}

// remove()

#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_only_the_matching_entry() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    let entry1 = make_entry("key1", "1");
    let entry2 = make_entry("key2", "2");
    vault.put(entry1.clone()).await.expect("put should succeed");
    vault.put(entry2.clone()).await.expect("put should succeed");

    vault.remove("key2").await.expect("remove should succeed");

    let entries = vault.entries().await.expect("list should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], entry1);
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_missing_key_is_a_no_op() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.put(make_entry("key1", "1")).await.expect("put should succeed");
    vault.put(make_entry("key2", "2")).await.expect("put should succeed");

    vault.remove("blippo").await.expect("remove of missing key should succeed");

    assert_eq!(vault.entries().await.expect("list should succeed").len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_on_empty_vault_is_a_no_op() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.remove("blippo").await.expect("remove should succeed");

    assert!(vault.entries().await.expect("list should succeed").is_empty());
}

// clear()

#[tokio::test(flavor = "multi_thread")]
async fn clear_on_empty_vault_is_a_no_op() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.clear().await.expect("clear should succeed");

    assert!(vault.entries().await.expect("list should succeed").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn clear_removes_every_entry_in_scope() {
    let harness = VaultHarness::new();
    let vault = harness.default_service();

    vault.put(make_entry("key1", "1")).await.expect("put should succeed");
    vault.put(make_entry("key2", "2")).await.expect("put should succeed");
    assert_eq!(vault.entries().await.expect("list should succeed").len(), 2);

    vault.clear().await.expect("clear should succeed");

    assert!(vault.entries().await.expect("list should succeed").is_empty());
}

// Scoping

#[tokio::test(flavor = "multi_thread")]
async fn services_are_isolated() {
    let harness = VaultHarness::new();
    let vault_a = harness.service(VaultConfig::new("com.lockbox.a").expect("valid config"));
    let vault_b = harness.service(VaultConfig::new("com.lockbox.b").expect("valid config"));

    vault_a.put(make_entry("key1", "1")).await.expect("put should succeed");

    assert!(vault_a.contains("key1").await.expect("contains should succeed"));
    assert!(!vault_b.contains("key1").await.expect("contains should succeed"));

    vault_b.clear().await.expect("clear should succeed");
    assert!(vault_a.contains("key1").await.expect("entry should survive foreign clear"));
}

#[tokio::test(flavor = "multi_thread")]
async fn access_groups_partition_a_service() {
    let harness = VaultHarness::new();
    let ungrouped =
        harness.service(VaultConfig::new("com.lockbox.tests").expect("valid config"));
    let grouped = harness.service(
        VaultConfig::with_options(
            "com.lockbox.tests",
            Some("shared-group"),
            Accessibility::default(),
        )
        .expect("valid config"),
    );

    ungrouped.put(make_entry("key1", "1")).await.expect("put should succeed");
    grouped.put(make_entry("key1", "2")).await.expect("put should succeed");

    let from_group = grouped
        .entry("key1")
        .await
        .expect("lookup should succeed")
        .expect("entry should exist");
    assert_eq!(from_group.account.as_deref(), Some("account2"));

    ungrouped.clear().await.expect("clear should succeed");
    assert!(grouped.contains("key1").await.expect("contains should succeed"));
}
