use std::path::PathBuf;

use btools_core::{FilterCriteria, SelectionSet};
use btools_query::SelectionSink;
use btools_store::{Store, StoreError, SAVED_SEARCHES_KEY, SELECTION_KEY};
use uuid::Uuid;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("btools-store-{}", Uuid::new_v4())))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn criteria(platform: &str) -> FilterCriteria {
    FilterCriteria {
        platform: Some(platform.to_string()),
        ..FilterCriteria::default()
    }
}

#[test]
fn selection_round_trips_in_order() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    assert!(store.read_selection().is_empty());

    let selection = SelectionSet::from_ids(["b3", "b1", "b2"]);
    store.write_selection(&selection).unwrap();

    let reopened = Store::open(&tmp.0).unwrap();
    assert_eq!(reopened.read_selection(), selection);
    assert!(tmp.0.join(format!("{SELECTION_KEY}.json")).exists());
}

#[test]
fn corrupt_selection_reads_as_empty() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    std::fs::write(tmp.0.join(format!("{SELECTION_KEY}.json")), "{not json").unwrap();
    assert!(store.read_selection().is_empty());
}

#[test]
fn store_is_a_selection_sink() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    store
        .persist_selection(&SelectionSet::from_ids(["x"]))
        .unwrap();
    assert!(store.read_selection().contains("x"));
}

#[test]
fn save_rejects_blank_name() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    let err = store.save_search("   ", &FilterCriteria::default()).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn new_searches_are_listed_newest_first() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    store.save_search("first", &criteria("YouTube")).unwrap();
    store.save_search("second", &criteria("TikTok")).unwrap();

    let names: Vec<String> = store.list_searches().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["second", "first"]);
}

#[test]
fn resaving_updates_in_place_and_keeps_created_at() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    let original = store.save_search("mine", &criteria("YouTube")).unwrap();
    store.save_search("other", &criteria("TikTok")).unwrap();
    let updated = store.save_search("mine", &criteria("Instagram")).unwrap();

    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    let list = store.list_searches();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name, "mine");
    assert_eq!(list[1].criteria.platform.as_deref(), Some("Instagram"));
}

#[test]
fn cap_evicts_oldest() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap().with_max_saved(2);
    for name in ["a", "b", "c"] {
        store.save_search(name, &FilterCriteria::default()).unwrap();
    }
    let names: Vec<String> = store.list_searches().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["c", "b"]);
}

#[test]
fn load_and_delete_report_missing_names() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    store.save_search("keep", &criteria("YouTube")).unwrap();

    assert_eq!(store.load_search("keep").unwrap().name, "keep");
    assert!(matches!(
        store.load_search("nope"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete_search("nope"),
        Err(StoreError::NotFound(_))
    ));

    store.delete_search("keep").unwrap();
    assert!(store.list_searches().is_empty());
}

#[test]
fn saved_criteria_are_normalized() {
    let tmp = TempDir::new();
    let store = Store::open(&tmp.0).unwrap();
    let raw = FilterCriteria {
        platform: Some("  ".to_string()),
        followers_min_k: Some(0.0),
        ..FilterCriteria::default()
    };
    let saved = store.save_search("blank", &raw).unwrap();
    assert_eq!(saved.criteria, FilterCriteria::default());
    assert!(tmp.0.join(format!("{SAVED_SEARCHES_KEY}.json")).exists());
}
