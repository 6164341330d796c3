use crate::{CoreError, MemoryObjectStore, ObjectStore};

use std::time::Duration;

/// WHAT: Seeded objects read back byte-identical
/// WHY: The memory store is the suite's stand-in for the real backend
#[test]
fn given_seeded_object_when_reading_then_bytes_returned() {
    // Given: a store with one object
    let store = MemoryObjectStore::new();
    store.insert("transcripts", "out/a.json", b"{\"text\":\"hi\"}".to_vec());

    // When: reading it
    let bytes = store.get_object("transcripts", "out/a.json").unwrap();

    // Then: the body matches what was seeded
    assert_eq!(bytes, b"{\"text\":\"hi\"}");
}

/// WHAT: Missing objects report not-found
/// WHY: Callers distinguish absence from outage
#[test]
fn given_missing_object_when_reading_then_object_not_found() {
    // Given: an empty store
    let store = MemoryObjectStore::new();

    // When: reading any key
    let result = store.get_object("transcripts", "out/a.json");

    // Then: the not-found case comes back
    assert!(matches!(result, Err(CoreError::ObjectNotFound { .. })));
}

/// WHAT: Listing scopes to bucket and prefix, in sorted order
/// WHY: Session discovery relies on deterministic listings
#[test]
fn given_mixed_objects_when_listing_then_prefix_scoped_and_sorted() {
    // Given: objects across prefixes and buckets, inserted out of order
    let store = MemoryObjectStore::new();
    store.insert("transcripts", "previous_sessions/b.json", b"b".to_vec());
    store.insert("transcripts", "previous_sessions/a.json", b"a".to_vec());
    store.insert("transcripts", "mapping/mapping.csv", b"m".to_vec());
    store.insert("other", "previous_sessions/c.json", b"c".to_vec());

    // When: listing one bucket's session prefix
    let keys = store
        .list_objects("transcripts", "previous_sessions/")
        .unwrap();

    // Then: only that bucket's matching keys, sorted
    assert_eq!(
        keys,
        vec!["previous_sessions/a.json", "previous_sessions/b.json"]
    );
}

/// WHAT: Writing twice replaces the body
/// WHY: Records are replaced whole on every save
#[test]
fn given_existing_object_when_putting_again_then_replaced() {
    // Given: an object written once
    let store = MemoryObjectStore::new();
    store.put_object("transcripts", "record.json", b"first").unwrap();

    // When: writing the same key again
    store.put_object("transcripts", "record.json", b"second").unwrap();

    // Then: only the second body remains
    assert_eq!(
        store.get_object("transcripts", "record.json").unwrap(),
        b"second"
    );
    assert_eq!(store.len(), 1);
}

/// WHAT: The memory backend cannot mint links
/// WHY: Exercises the "no playback link" rendering path end to end
#[test]
fn given_any_object_when_signing_then_no_url() {
    // Given: a store holding the object
    let store = MemoryObjectStore::new();
    store.insert("transcripts", "audio/a.wav", b"riff".to_vec());

    // When: requesting a link
    let url = store
        .signed_url("transcripts", "audio/a.wav", "audio/wav", Duration::from_secs(3600))
        .unwrap();

    // Then: there is none, and that is not an error
    assert!(url.is_none());
}
