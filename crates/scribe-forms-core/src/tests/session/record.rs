use crate::{CorrectionEntry, Session};

use chrono::{Local, TimeZone};

// Test constants
const ITEM_KEY: &str = "s3://transcripts/audio/clip_0001.wav";

fn fixed_entry(original: Option<&str>, corrected: &str) -> CorrectionEntry {
    let now = Local.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap();
    CorrectionEntry::new_at(original.map(str::to_string), corrected.to_string(), now)
}

/// WHAT: Records serialize as the bare item-keyed JSON object
/// WHY: The stored layout is the contract with downstream tooling
#[test]
fn given_entries_when_serializing_then_bare_object_layout() {
    // Given: a session with one entry
    let mut session = Session::new();
    session.upsert(ITEM_KEY, fixed_entry(Some("machine text"), "hello"));

    // When: serializing it
    let value = serde_json::to_value(&session).unwrap();

    // Then: the item key is a top-level key, with the three entry fields
    assert_eq!(value[ITEM_KEY]["original_transcript"], "machine text");
    assert_eq!(value[ITEM_KEY]["corrected_transcript"], "hello");
    assert_eq!(value[ITEM_KEY]["timestamp"], "20260305_143000");
    assert!(value.get("entries").is_none());
}

/// WHAT: A missing machine transcript serializes as JSON null
/// WHY: Downstream tooling distinguishes "no transcript" from empty text
#[test]
fn given_no_original_when_serializing_then_null() {
    // Given: an entry saved without a machine transcript
    let mut session = Session::new();
    session.upsert(ITEM_KEY, fixed_entry(None, "hello"));

    // When: serializing it
    let value = serde_json::to_value(&session).unwrap();

    // Then: the field is literal null
    assert!(value[ITEM_KEY]["original_transcript"].is_null());
}

/// WHAT: Non-ASCII corrections survive the round trip byte-exact
/// WHY: The reviewed languages are written with diacritics throughout
#[test]
fn given_non_ascii_text_when_round_tripping_then_preserved() {
    // Given: a Yoruba correction
    let corrected = "Báwo ni ọjà ṣe wà lónìí?";
    let mut session = Session::new();
    session.upsert(ITEM_KEY, fixed_entry(Some("bawo ni oja"), corrected));

    // When: serializing pretty and parsing back
    let bytes = serde_json::to_vec_pretty(&session).unwrap();
    let restored: Session = serde_json::from_slice(&bytes).unwrap();

    // Then: the bytes carry the text literally (no \u escapes) and the
    // restored record is identical
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("ọjà"));
    assert_eq!(restored, session);
}

/// WHAT: Upserting an existing key replaces the entry wholesale
/// WHY: Every save re-captures transcript, text and timestamp together
#[test]
fn given_existing_key_when_upserting_then_replaced() {
    // Given: a session with one entry
    let mut session = Session::new();
    session.upsert(ITEM_KEY, fixed_entry(Some("v1"), "first"));

    // When: upserting the same key
    session.upsert(ITEM_KEY, fixed_entry(None, "second"));

    // Then: one entry, fully replaced
    assert_eq!(session.len(), 1);
    let entry = session.entry(ITEM_KEY).unwrap();
    assert_eq!(entry.corrected_transcript(), "second");
    assert!(entry.original_transcript().is_none());
}

/// WHAT: Entries missing fields still deserialize, with defaults
/// WHY: Hand-edited or older records must not lock the session out
#[test]
fn given_partial_entry_json_when_deserializing_then_defaults_fill() {
    // Given: a record whose entry carries only the corrected text
    let raw = format!(r#"{{ "{}": {{ "corrected_transcript": "hello" }} }}"#, ITEM_KEY);

    // When: deserializing it
    let session: Session = serde_json::from_str(&raw).unwrap();

    // Then: the other fields default
    let entry = session.entry(ITEM_KEY).unwrap();
    assert_eq!(entry.corrected_transcript(), "hello");
    assert!(entry.original_transcript().is_none());
    assert_eq!(entry.timestamp(), "");
}

/// WHAT: Iteration yields entries in key order
/// WHY: Deterministic layout keeps stored records diffable
#[test]
fn given_entries_when_iterating_then_key_ordered() {
    // Given: entries inserted out of order
    let mut session = Session::new();
    session.upsert("s3://t/audio/b.wav", fixed_entry(None, "b"));
    session.upsert("s3://t/audio/a.wav", fixed_entry(None, "a"));

    // When: iterating
    let keys: Vec<&str> = session.iter().map(|(key, _)| key).collect();

    // Then: keys come back sorted
    assert_eq!(keys, vec!["s3://t/audio/a.wav", "s3://t/audio/b.wav"]);
}
