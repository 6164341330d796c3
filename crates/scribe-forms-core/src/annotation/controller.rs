//! Per-page review flow: assemble what the annotator sees, persist what
//! they submit.

use crate::{
    CoreError, CoreResult,
    annotation::Pagination,
    catalog::WorkItem,
    session::{CorrectionEntry, Session, SessionId, SessionStore},
    store::{ObjectStore, StoreLocation},
};

use std::{panic::Location, sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

const AUDIO_CONTENT_TYPE: &str = "audio/wav";

/// Everything needed to render one work item on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// 1-based position of the item across the whole form.
    pub number: usize,
    /// The item key submitted back on save: the audio input location.
    pub key: String,
    /// Audio file name without its extension.
    pub title: String,
    /// Time-limited playback link, when the store can mint one.
    pub audio_url: Option<String>,
    /// The machine transcript, when one could be fetched.
    pub original_transcript: Option<String>,
    /// Pre-fill for the edit field: the previously saved correction, or
    /// empty.
    pub corrected_text: String,
}

/// One rendered page of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// The 1-based page that was requested.
    pub page: usize,
    /// Total pages for the form.
    pub page_count: usize,
    /// Items on this page; empty when the page is out of range or the form
    /// has no items.
    pub items: Vec<ItemView>,
}

/// Drives the review of one form within one active session.
///
/// Rendering is deliberately forgiving: a missing transcript, an unsignable
/// audio link, or an unreachable session record all degrade to blanks so
/// the annotator can keep working. Saving is the opposite: any failure to
/// read back or write through the record propagates, because a swallowed
/// save is a lost correction.
pub struct AnnotationController {
    store: Arc<dyn ObjectStore>,
    sessions: SessionStore,
    session_id: SessionId,
    items: Vec<WorkItem>,
    items_per_page: usize,
    url_ttl: Duration,
}

impl AnnotationController {
    /// Binds a controller to an active session and its form's items.
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        sessions: SessionStore,
        session_id: SessionId,
        items: Vec<WorkItem>,
        items_per_page: usize,
        url_ttl: Duration,
    ) -> Self {
        Self {
            store,
            sessions,
            session_id,
            items,
            items_per_page,
            url_ttl,
        }
    }

    /// The active session identifier.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Number of items in the form.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total pages for the form.
    #[must_use]
    pub fn page_count(&self) -> usize {
        Pagination::new(self.items.len(), self.items_per_page).page_count()
    }

    /// Renders 1-based `page`.
    ///
    /// An out-of-range page renders with zero items. A session record that
    /// cannot be read renders as if empty, with a warning logged; nothing
    /// on this path is an error.
    #[must_use]
    #[instrument(skip(self))]
    pub fn render_page(&self, page: usize) -> PageView {
        let session = self.session_or_empty();
        let pagination = Pagination::new(self.items.len(), self.items_per_page);
        let range = pagination.page_range(page);
        let start = range.start;
        let items = self.items[range]
            .iter()
            .enumerate()
            .map(|(offset, item)| self.item_view(start + offset, item, &session))
            .collect();
        PageView {
            page,
            page_count: pagination.page_count(),
            items,
        }
    }

    /// Persists one correction, stamped with the current wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownWorkItem`] when `key` is not part of
    /// this form, and [`CoreError::StoreUnavailable`] when the session
    /// record cannot be read back or written through.
    #[track_caller]
    pub fn save_correction(&self, key: &str, edited_text: &str) -> CoreResult<()> {
        self.save_correction_at(key, edited_text, Local::now())
    }

    /// Persists one correction stamped with `now`.
    ///
    /// The record is re-read, the machine transcript re-fetched, and the
    /// whole record written back with the entry replaced wholesale.
    /// Resubmitting unchanged text still moves the entry's timestamp.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::save_correction`]. The read-back failure
    /// case propagates rather than degrading: writing on top of an
    /// unreadable record would replace every other entry in it.
    #[track_caller]
    #[instrument(skip(self, edited_text, now))]
    pub fn save_correction_at(
        &self,
        key: &str,
        edited_text: &str,
        now: DateTime<Local>,
    ) -> CoreResult<()> {
        let item = self
            .items
            .iter()
            .find(|item| item.input_location() == key)
            .ok_or_else(|| CoreError::UnknownWorkItem {
                key: key.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let mut session = self.sessions.read(&self.session_id)?;
        let original = self.original_transcript(item);
        let entry = CorrectionEntry::new_at(original, edited_text.to_string(), now);
        session.upsert(item.input_location(), entry);
        self.sessions.write(&self.session_id, &session)?;
        info!(key = %key, session_id = %self.session_id, "Correction saved");
        Ok(())
    }

    fn session_or_empty(&self) -> Session {
        match self.sessions.read(&self.session_id) {
            Ok(session) => session,
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    error = %e,
                    "Session record unreachable; rendering empty"
                );
                Session::new()
            }
        }
    }

    fn item_view(&self, index: usize, item: &WorkItem, session: &Session) -> ItemView {
        let corrected_text = session
            .entry(item.input_location())
            .map(|entry| entry.corrected_transcript().to_string())
            .unwrap_or_default();
        ItemView {
            number: index + 1,
            key: item.input_location().to_string(),
            title: item.display_name(),
            audio_url: self.audio_url(item),
            original_transcript: self.original_transcript(item),
            corrected_text,
        }
    }

    /// Playback link for an item, or `None` when the location does not
    /// parse or the backend cannot sign.
    fn audio_url(&self, item: &WorkItem) -> Option<String> {
        let Some(location) = StoreLocation::parse(item.input_location()) else {
            warn!(
                input_location = %item.input_location(),
                "Audio location does not parse; no playback link"
            );
            return None;
        };
        match self
            .store
            .signed_url(location.bucket(), location.key(), AUDIO_CONTENT_TYPE, self.url_ttl)
        {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    input_location = %item.input_location(),
                    error = %e,
                    "Signing audio link failed; no playback link"
                );
                None
            }
        }
    }

    /// The machine transcript for an item: the `"text"` field of the JSON
    /// body at its output location. Items without an output location make
    /// no store call at all.
    fn original_transcript(&self, item: &WorkItem) -> Option<String> {
        let output_location = item.output_location()?;
        let Some(location) = StoreLocation::parse(output_location) else {
            warn!(
                output_location = %output_location,
                "Transcript location does not parse"
            );
            return None;
        };
        let body = match self.store.get_object(location.bucket(), location.key()) {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    output_location = %output_location,
                    error = %e,
                    "Machine transcript unavailable"
                );
                return None;
            }
        };
        let value: serde_json::Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    output_location = %output_location,
                    error = %e,
                    "Machine transcript is not valid JSON"
                );
                return None;
            }
        };
        value
            .get("text")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }
}
