mod common;

use common::FlakyRepository;
use medremind_core::store::preferences::PREFERENCES_KEY;
use medremind_core::{
    load_preferences, save_preferences, NotificationPreferences, SqliteKeyValueRepository,
    StoreError,
};

#[test]
fn never_saved_preferences_are_all_enabled() {
    let repo = FlakyRepository::default();
    assert_eq!(
        load_preferences(&repo).unwrap(),
        NotificationPreferences::default()
    );
}

#[test]
fn saved_preferences_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medremind.db");
    let prefs = NotificationPreferences {
        expiry_alerts: false,
        ..NotificationPreferences::default()
    };

    {
        let repo = SqliteKeyValueRepository::open(&path).unwrap();
        save_preferences(&repo, &prefs).unwrap();
    }
    let repo = SqliteKeyValueRepository::open(&path).unwrap();
    assert_eq!(load_preferences(&repo).unwrap(), prefs);
}

#[test]
fn stored_json_uses_camel_case_keys() {
    let repo = FlakyRepository::default();
    save_preferences(&repo, &NotificationPreferences::default()).unwrap();
    let raw = repo.raw(PREFERENCES_KEY).unwrap();
    assert!(raw.contains("\"lowStockAlerts\":true"));
}

#[test]
fn corrupt_preferences_are_reported() {
    let repo = FlakyRepository::with_value(PREFERENCES_KEY, "{oops");
    assert!(matches!(
        load_preferences(&repo).unwrap_err(),
        StoreError::Decode(_)
    ));
}

#[test]
fn write_failure_is_reported() {
    let repo = FlakyRepository::default();
    repo.fail_writes.set(true);
    assert!(matches!(
        save_preferences(&repo, &NotificationPreferences::default()).unwrap_err(),
        StoreError::Write(_)
    ));
}
