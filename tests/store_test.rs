//! Storage adapter tests against a temporary database file

use tempfile::NamedTempFile;

use shorturl::database::UrlStore;

fn setup_store() -> (UrlStore, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let store =
        UrlStore::open(temp_db.path().to_str().unwrap()).expect("Failed to initialize store");
    (store, temp_db)
}

#[test]
fn test_empty_store() {
    let (store, _temp_db) = setup_store();

    assert_eq!(store.count().unwrap(), 0);
    assert!(store.find_by_short_id(1).unwrap().is_none());
    assert!(store
        .find_by_original_url("https://example.com")
        .unwrap()
        .is_none());
}

#[test]
fn test_insert_assigns_dense_sequential_ids() {
    let (store, _temp_db) = setup_store();

    let a = store.insert("https://example.com/a").unwrap();
    let b = store.insert("https://example.com/b").unwrap();
    let c = store.insert("https://example.com/c").unwrap();

    assert_eq!(a.short_id, 1);
    assert_eq!(b.short_id, 2);
    assert_eq!(c.short_id, 3);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_insert_deduplicates_without_bumping_counter() {
    let (store, _temp_db) = setup_store();

    let first = store.insert("https://example.com/dup").unwrap();
    let second = store.insert("https://example.com/dup").unwrap();

    assert_eq!(first, second);
    assert_eq!(store.count().unwrap(), 1);

    // The counter did not advance for the duplicate.
    let next = store.insert("https://example.com/next").unwrap();
    assert_eq!(next.short_id, 2);
}

#[test]
fn test_lookups_round_trip() {
    let (store, _temp_db) = setup_store();

    let inserted = store.insert("https://example.com/lookup").unwrap();

    let by_id = store.find_by_short_id(inserted.short_id).unwrap().unwrap();
    assert_eq!(by_id.original_url, "https://example.com/lookup");

    let by_url = store
        .find_by_original_url("https://example.com/lookup")
        .unwrap()
        .unwrap();
    assert_eq!(by_url.short_id, inserted.short_id);
}

#[test]
fn test_dedup_is_exact_string_match() {
    let (store, _temp_db) = setup_store();

    // No URL normalization: a trailing slash makes a distinct entry.
    let without = store.insert("http://example.com").unwrap();
    let with = store.insert("http://example.com/").unwrap();

    assert_ne!(without.short_id, with.short_id);
    assert_eq!(store.count().unwrap(), 2);
}
