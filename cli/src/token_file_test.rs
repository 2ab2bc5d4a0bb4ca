use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("nested").join("token"))
}

#[test]
fn missing_file_is_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.load(), None);
    assert!(!store.has_session());
}

#[test]
fn save_creates_parent_dirs_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.save("tok-123").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "tok-123\n");
    assert_eq!(store.load().as_deref(), Some("tok-123"));
}

#[test]
fn blank_file_is_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save("  ").unwrap();
    assert_eq!(store.load(), None);
}

#[test]
fn clear_removes_file_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save("tok-123").unwrap();

    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[cfg(unix)]
#[test]
fn token_file_is_private() {
    use std::os::unix::fs::PermissionsExt as _;

    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save("tok-123").unwrap();
    let mode = fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
