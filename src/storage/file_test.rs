// Tests for FileStore
// Test cases:
// - Missing file opens as empty store
// - Values persist across reopen
// - Malformed file fails with Corrupt
// - Failed write leaves cached values untouched

use super::*;
use tempfile::TempDir;

fn create_test_store() -> (FileStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.json");
    let store = FileStore::open(path).unwrap();
    (store, temp_dir)
}

#[test]
fn test_missing_file_is_empty() {
    let (store, _temp_dir) = create_test_store();
    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn test_values_persist_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("storage.json");

    {
        let store = FileStore::open(path.clone()).unwrap();
        store.set("med_editor_theme", "dark").unwrap();
        store.set("med_editor_content", "linha 1\nlinha 2").unwrap();
        store.set("gone", "x").unwrap();
        store.remove("gone").unwrap();
    }

    let reopened = FileStore::open(path).unwrap();
    assert_eq!(reopened.get("med_editor_theme").unwrap(), Some("dark".to_string()));
    assert_eq!(
        reopened.get("med_editor_content").unwrap(),
        Some("linha 1\nlinha 2".to_string())
    );
    assert_eq!(reopened.get("gone").unwrap(), None);
}

#[test]
fn test_no_temp_file_left_behind() {
    let (store, temp_dir) = create_test_store();
    store.set("k", "v").unwrap();
    assert!(!temp_dir.path().join("storage.tmp").exists());
    assert!(temp_dir.path().join("storage.json").exists());
}

#[test]
fn test_malformed_file_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let result = FileStore::open(path);
    assert!(matches!(result, Err(StorageError::Corrupt(_))));
}

#[test]
fn test_empty_file_is_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.json");
    fs::write(&path, "").unwrap();

    let store = FileStore::open(path).unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_failed_write_keeps_previous_values() {
    let temp_dir = TempDir::new().unwrap();
    // Parent "directory" is a regular file, so every write fails
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let store = FileStore::open(blocker.join("storage.json")).unwrap();

    let result = store.set("k", "v");
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
    assert_eq!(store.get("k").unwrap(), None);
}
