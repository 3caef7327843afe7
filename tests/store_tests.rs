mod common;

use common::login_descriptor;
use locator_forge::error::StoreError;
use locator_forge::store::{CollectionStore, DEFAULT_SESSION, ResultKind};

fn temp_store() -> (tempfile::TempDir, CollectionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = CollectionStore::open(dir.path().join("store.json")).unwrap();
    (dir, store)
}

// =========================================================================
// Sessions
// =========================================================================

#[test]
fn missing_file_opens_empty() {
    let (_dir, store) = temp_store();
    assert!(store.elements(DEFAULT_SESSION).is_empty());
    assert_eq!(store.sessions().count(), 0);
    assert_eq!(store.result(ResultKind::Locators), None);
}

#[test]
fn append_preserves_order_and_reports_length() {
    let (_dir, mut store) = temp_store();

    assert_eq!(store.append(DEFAULT_SESSION, login_descriptor("button")).unwrap(), 1);
    assert_eq!(store.append(DEFAULT_SESSION, login_descriptor("a")).unwrap(), 2);
    assert_eq!(
        store.extend(DEFAULT_SESSION, vec![login_descriptor("li"), login_descriptor("ul")]).unwrap(),
        4
    );

    let tags: Vec<&str> = store
        .elements(DEFAULT_SESSION)
        .iter()
        .map(|d| d.tag_name.as_str())
        .collect();
    assert_eq!(tags, vec!["button", "a", "li", "ul"]);
}

#[test]
fn duplicates_are_kept() {
    let (_dir, mut store) = temp_store();
    store.append(DEFAULT_SESSION, login_descriptor("button")).unwrap();
    store.append(DEFAULT_SESSION, login_descriptor("button")).unwrap();
    assert_eq!(store.elements(DEFAULT_SESSION).len(), 2);
}

#[test]
fn sessions_are_independent() {
    let (_dir, mut store) = temp_store();
    store.append("login", login_descriptor("button")).unwrap();
    store.append("menu", login_descriptor("li")).unwrap();
    store.append("menu", login_descriptor("a")).unwrap();

    assert_eq!(store.sessions().collect::<Vec<_>>(), vec![("login", 1), ("menu", 2)]);

    store.clear_session("menu").unwrap();
    assert!(store.elements("menu").is_empty());
    assert_eq!(store.elements("login").len(), 1);
}

#[test]
fn contents_survive_reopen() {
    let (dir, mut store) = temp_store();
    store.append(DEFAULT_SESSION, login_descriptor("button")).unwrap();
    store.set_result(ResultKind::PageObject, "class LoginPage {}").unwrap();

    let reopened = CollectionStore::open(dir.path().join("store.json")).unwrap();
    assert_eq!(reopened.elements(DEFAULT_SESSION), store.elements(DEFAULT_SESSION));
    assert_eq!(reopened.result(ResultKind::PageObject), Some("class LoginPage {}"));
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/store.json");
    let mut store = CollectionStore::open(&path).unwrap();
    store.append(DEFAULT_SESSION, login_descriptor("a")).unwrap();
    assert!(path.exists());
}

// =========================================================================
// Results
// =========================================================================

#[test]
fn setting_a_result_replaces_the_other_kind() {
    let (_dir, mut store) = temp_store();

    store.set_result(ResultKind::Locators, "by id").unwrap();
    assert_eq!(store.result(ResultKind::Locators), Some("by id"));

    store.set_result(ResultKind::PageObject, "class P {}").unwrap();
    assert_eq!(store.result(ResultKind::Locators), None, "locators cleared");
    assert_eq!(store.result(ResultKind::PageObject), Some("class P {}"));
}

#[test]
fn clear_all_drops_sessions_and_results() {
    let (_dir, mut store) = temp_store();
    store.append("x", login_descriptor("a")).unwrap();
    store.set_result(ResultKind::Locators, "by id").unwrap();

    store.clear_all().unwrap();
    assert_eq!(store.sessions().count(), 0);
    assert_eq!(store.result(ResultKind::Locators), None);
}

#[test]
fn result_kind_display() {
    assert_eq!(ResultKind::Locators.to_string(), "Locators");
    assert_eq!(ResultKind::PageObject.to_string(), "Page Object");
}

// =========================================================================
// File handling
// =========================================================================

#[test]
fn empty_file_is_an_empty_store() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = CollectionStore::open(file.path()).unwrap();
    assert_eq!(store.sessions().count(), 0);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = CollectionStore::open(&path).err().expect("corrupt store rejected");
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn store_file_uses_camel_case_keys() {
    let (dir, mut store) = temp_store();
    store.append(DEFAULT_SESSION, login_descriptor("button")).unwrap();
    store.set_result(ResultKind::PageObject, "po").unwrap();

    let raw = std::fs::read_to_string(dir.path().join("store.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["pageObject"], "po");
    assert_eq!(json["sessions"]["default"][0]["tagName"], "button");
}
