use super::*;

#[test]
fn test_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.set("a", "1").unwrap();
    assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
    assert_eq!(store.len(), 1);

    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap(), Some("2".to_string()));

    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);
}

#[test]
fn test_remove_missing_key_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove("missing").is_ok());
}
