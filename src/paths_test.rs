use super::*;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override_wins() {
    std::env::set_var(DATA_DIR_ENV, "/tmp/med-editor-test");
    assert_eq!(get_data_dir().unwrap(), PathBuf::from("/tmp/med-editor-test"));
    assert_eq!(
        get_storage_path().unwrap(),
        PathBuf::from("/tmp/med-editor-test").join(STORAGE_FILE)
    );
    std::env::remove_var(DATA_DIR_ENV);
}

#[test]
#[serial]
fn test_empty_override_is_ignored() {
    std::env::set_var(DATA_DIR_ENV, "");
    if let Ok(dir) = get_data_dir() {
        assert!(dir.ends_with(APP_DIR));
    }
    std::env::remove_var(DATA_DIR_ENV);
}
