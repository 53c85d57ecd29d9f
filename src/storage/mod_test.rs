// Tests for the storage module's public API

use super::*;

#[test]
fn test_key_value_store_is_object_safe() {
    fn _takes_dyn(_: &dyn KeyValueStore) {}
}

#[test]
fn test_keys_are_distinct() {
    let all = [keys::CONTENT, keys::SNIPPETS, keys::THEME, keys::VIM, keys::SIDEBAR];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_storage_error_messages() {
    let err = StorageError::Unavailable("quota exceeded".to_string());
    assert!(err.to_string().contains("quota exceeded"));
    let err = StorageError::Corrupt("expected value".to_string());
    assert!(err.to_string().contains("corrupt"));
}
