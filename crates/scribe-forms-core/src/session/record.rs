//! The durable session record: per-item corrections keyed by audio location.

use crate::session::id::TIMESTAMP_FORMAT;

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One saved correction for one audio clip.
///
/// Every save replaces the whole entry: the machine transcript is re-read,
/// the corrected text is taken from the submission, and the timestamp is
/// stamped fresh. Re-saving unchanged text therefore still moves the
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    #[serde(default)]
    original_transcript: Option<String>,
    #[serde(default)]
    corrected_transcript: String,
    #[serde(default)]
    timestamp: String,
}

impl CorrectionEntry {
    /// Builds an entry stamped with the current local time.
    #[must_use]
    pub fn new(original_transcript: Option<String>, corrected_transcript: String) -> Self {
        Self::new_at(original_transcript, corrected_transcript, Local::now())
    }

    /// Builds an entry stamped with `now`.
    #[must_use]
    pub fn new_at(
        original_transcript: Option<String>,
        corrected_transcript: String,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            original_transcript,
            corrected_transcript,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// The machine transcript captured at save time, when one existed.
    #[must_use]
    pub fn original_transcript(&self) -> Option<&str> {
        self.original_transcript.as_deref()
    }

    /// The annotator's corrected text.
    #[must_use]
    pub fn corrected_transcript(&self) -> &str {
        &self.corrected_transcript
    }

    /// When the entry was last saved, as `%Y%m%d_%H%M%S` local time.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// One annotator's corrections for one form.
///
/// Serializes transparently as the bare JSON object, so a record on storage
/// reads as `{ "<input_location>": { ...entry... }, ... }` with keys in
/// deterministic order. The record is the sole source of truth for its
/// session and is overwritten whole on every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    entries: BTreeMap<String, CorrectionEntry>,
}

impl Session {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The saved entry for `input_location`, if any.
    #[must_use]
    pub fn entry(&self, input_location: &str) -> Option<&CorrectionEntry> {
        self.entries.get(input_location)
    }

    /// Inserts or replaces the entry for `input_location`.
    pub fn upsert(&mut self, input_location: impl Into<String>, entry: CorrectionEntry) {
        self.entries.insert(input_location.into(), entry);
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CorrectionEntry)> {
        self.entries
            .iter()
            .map(|(location, entry)| (location.as_str(), entry))
    }

    /// Number of corrected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been corrected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
