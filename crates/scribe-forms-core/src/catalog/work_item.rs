//! One reviewable unit: an audio clip and the machine outputs tied to it.

use std::path::Path;

use serde::Deserialize;

/// A single reviewable unit from the mapping source.
///
/// `input_location` is the primary key: it points at the source audio and
/// identifies the item inside session records. `output_location` points at
/// the machine transcript and may be absent. `form_title` groups items into
/// the batches annotators pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    input_location: String,
    output_location: Option<String>,
    form_title: String,
}

impl WorkItem {
    /// Builds an item directly, bypassing the CSV source.
    #[must_use]
    pub fn new(
        input_location: impl Into<String>,
        output_location: Option<String>,
        form_title: impl Into<String>,
    ) -> Self {
        Self {
            input_location: input_location.into(),
            output_location,
            form_title: form_title.into(),
        }
    }

    /// Location of the source audio. Never empty.
    #[must_use]
    pub fn input_location(&self) -> &str {
        &self.input_location
    }

    /// Location of the machine transcript, when one was produced.
    #[must_use]
    pub fn output_location(&self) -> Option<&str> {
        self.output_location.as_deref()
    }

    /// Title of the form this item belongs to. Empty when the source row
    /// carried no document location.
    #[must_use]
    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    /// Human-facing item title: the audio file name without its `.wav`
    /// extension.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = Path::new(&self.input_location)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.input_location);
        name.strip_suffix(".wav").unwrap_or(name).to_string()
    }
}

/// Raw mapping row as serde sees it in the CSV source. Columns beyond these
/// three are ignored; a column absent from the header reads as `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct MappingRow {
    #[serde(default)]
    sgm_input_location: Option<String>,
    #[serde(default)]
    sgm_output_location: Option<String>,
    #[serde(default)]
    doc_full_transcription_location: Option<String>,
}

impl MappingRow {
    /// Converts the row into a [`WorkItem`], or `None` when the audio input
    /// location is missing.
    pub(crate) fn into_work_item(self) -> Option<WorkItem> {
        let input_location = self.sgm_input_location?;
        let form_title = self
            .doc_full_transcription_location
            .as_deref()
            .map(title_from_document_location)
            .unwrap_or_default();
        Some(WorkItem {
            input_location,
            output_location: self.sgm_output_location,
            form_title,
        })
    }
}

/// Form title derivation: the document file name with its extension stripped.
fn title_from_document_location(location: &str) -> String {
    Path::new(location)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}
