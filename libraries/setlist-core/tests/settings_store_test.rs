//! Integration tests for the file-backed settings store

use setlist_core::{JsonSettingsStore, SettingsStore};
use std::fs;

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSettingsStore::new(dir.path().join("settings.json"));

    assert!(store.load("volume").is_none());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");
    let store = JsonSettingsStore::new(&path);

    store.save("volume", "42").unwrap();

    assert!(path.exists());
    assert_eq!(store.load("volume").as_deref(), Some("42"));
}

#[test]
fn values_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    JsonSettingsStore::new(&path).save("volume", "17").unwrap();

    let reopened = JsonSettingsStore::new(&path);
    assert_eq!(reopened.load("volume").as_deref(), Some("17"));
}

#[test]
fn writes_preserve_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme": "dark", "volume": 10}"#).unwrap();

    let store = JsonSettingsStore::new(&path);
    // Non-string JSON values are surfaced in their textual form
    assert_eq!(store.load("volume").as_deref(), Some("10"));

    store.save("volume", "55").unwrap();

    assert_eq!(store.load("theme").as_deref(), Some("dark"));
    assert_eq!(store.load("volume").as_deref(), Some("55"));
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonSettingsStore::new(&path);
    assert!(store.load("volume").is_none());

    store.save("volume", "80").unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["volume"], "80");
}

#[test]
fn no_temp_files_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonSettingsStore::new(dir.path().join("settings.json"));

    for level in 0..5 {
        store.save("volume", &level.to_string()).unwrap();
    }

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
