//! Durable storage of session records under a fixed key prefix.

use crate::{
    CoreError, CoreResult,
    session::{AnnotatorName, Session, SessionId},
    store::ObjectStore,
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Reads and writes session records as JSON objects in the blob store.
///
/// Records live at `{prefix}{session_id}.json`. Reads are permissive: a
/// missing or unreadable record behaves as an empty session so annotators
/// are never locked out of their own work. Only transport failure is an
/// error.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: String,
}

impl SessionStore {
    /// Binds the store to a bucket and record prefix.
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Storage key of the record for `id`.
    #[must_use]
    pub fn record_key(&self, id: &SessionId) -> String {
        format!("{}{}.json", self.prefix, id)
    }

    /// Loads the record for `id`.
    ///
    /// Missing records and records that fail to parse both load as an empty
    /// session; the latter is logged.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreUnavailable`] when the store transport
    /// fails.
    #[instrument(skip(self))]
    pub fn read(&self, id: &SessionId) -> CoreResult<Session> {
        let key = self.record_key(id);
        let body = match self.store.get_object(&self.bucket, &key) {
            Ok(body) => body,
            Err(CoreError::ObjectNotFound { .. }) => {
                debug!(session_id = %id, "No stored record; starting empty");
                return Ok(Session::new());
            }
            Err(e) => return Err(e),
        };
        match serde_json::from_slice(&body) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(
                    session_id = %id,
                    error = %e,
                    "Session record unreadable; treating as empty"
                );
                Ok(Session::new())
            }
        }
    }

    /// Writes the whole record for `id`, replacing any previous version.
    ///
    /// There is no version check: concurrent writers race and the last
    /// write wins in full. The entry count logged here is what makes a
    /// lost update diagnosable after the fact.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreUnavailable`] when the record cannot be
    /// serialized or stored.
    #[track_caller]
    #[instrument(skip(self, session))]
    pub fn write(&self, id: &SessionId, session: &Session) -> CoreResult<()> {
        let key = self.record_key(id);
        let body = serde_json::to_vec_pretty(session).map_err(|e| CoreError::StoreUnavailable {
            reason: format!("Failed to serialize session record: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.store.put_object(&self.bucket, &key, &body)?;
        info!(
            session_id = %id,
            entries = session.len(),
            "Session record written"
        );
        Ok(())
    }

    /// Lists stored sessions whose identifier mentions both the form title
    /// and the annotator name.
    ///
    /// Matching is by substring, the same way the records were named at
    /// creation. Zero matches is an ordinary empty list. Results follow
    /// storage listing order, so repeated calls without intervening writes
    /// return the same list.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreUnavailable`] when the listing fails.
    #[instrument(skip(self))]
    pub fn list_previous(
        &self,
        form_title: &str,
        annotator: &AnnotatorName,
    ) -> CoreResult<Vec<SessionId>> {
        let keys = self.store.list_objects(&self.bucket, &self.prefix)?;
        let ids: Vec<SessionId> = keys
            .iter()
            .filter_map(|key| key.strip_prefix(self.prefix.as_str()))
            .filter_map(|name| name.strip_suffix(".json"))
            .filter(|id| id.contains(form_title) && id.contains(annotator.as_str()))
            .map(SessionId::from_stored)
            .collect();
        debug!(
            form_title = %form_title,
            annotator = %annotator,
            found = ids.len(),
            "Listed previous sessions"
        );
        Ok(ids)
    }
}
