//! Session identity: normalized annotator names and session identifiers.

use crate::{CoreError, CoreResult};

use std::{fmt, panic::Location};

use chrono::{DateTime, Local};
use error_location::ErrorLocation;

/// Timestamp layout embedded in session identifiers and correction entries.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Annotator name normalized for use inside session identifiers:
/// lower-cased with all spaces removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatorName(String);

impl AnnotatorName {
    /// Normalizes `raw` into an identifier-safe name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAnnotator`] when nothing remains after
    /// normalization.
    #[track_caller]
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let normalized = raw.to_lowercase().replace(' ', "");
        if normalized.is_empty() {
            return Err(CoreError::InvalidAnnotator {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(normalized))
    }

    /// The normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one review session.
///
/// Fresh identifiers are `{annotator}_{timestamp}_{form_title}`; identifiers
/// recovered from storage keep whatever shape they were stored with. The
/// `.json` extension of the stored record is storage layout, not part of the
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Mints an identifier for a session starting now.
    #[must_use]
    pub fn fresh(annotator: &AnnotatorName, form_title: &str) -> Self {
        Self::fresh_at(annotator, form_title, Local::now())
    }

    /// Mints an identifier for a session starting at `now`.
    ///
    /// Timestamps have second granularity: two sessions minted within the
    /// same second by the same annotator on the same form produce the same
    /// identifier, and the later record overwrites the earlier one.
    #[must_use]
    pub fn fresh_at(annotator: &AnnotatorName, form_title: &str, now: DateTime<Local>) -> Self {
        Self(format!(
            "{}_{}_{}",
            annotator,
            now.format(TIMESTAMP_FORMAT),
            form_title
        ))
    }

    /// Wraps an identifier recovered from storage discovery.
    #[must_use]
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as stored, without any extension.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
