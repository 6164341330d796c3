//! Catalog of work items for one language, parsed from the mapping CSV.

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

use crate::{
    catalog::work_item::{MappingRow, WorkItem},
    error::{CoreError, Result},
    store::ObjectStore,
};

/// Immutable set of work items for one language.
///
/// Loaded in full from the mapping CSV and never mutated afterwards; callers
/// reload when they switch language.
#[derive(Debug, Clone, Default)]
pub struct WorkItemCatalog {
    items: Vec<WorkItem>,
}

impl WorkItemCatalog {
    /// Fetches the mapping CSV at `bucket`/`key` and parses it.
    #[track_caller]
    #[instrument(skip(store))]
    pub fn load(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<Self> {
        let body = store
            .get_object(bucket, key)
            .map_err(|e| CoreError::CatalogUnavailable {
                reason: format!("Failed to fetch mapping {}/{}: {}", bucket, key, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let catalog = Self::from_csv(&body)?;
        debug!(
            bucket = %bucket,
            key = %key,
            items = catalog.items.len(),
            "Loaded work-item catalog"
        );
        Ok(catalog)
    }

    /// Parses mapping rows from CSV bytes. Rows without an audio input
    /// location are dropped; a row that cannot be parsed at all fails the
    /// whole catalog.
    #[track_caller]
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(bytes);
        let mut items = Vec::new();
        let mut dropped = 0usize;
        for row in reader.deserialize::<MappingRow>() {
            let row = row.map_err(|e| CoreError::CatalogUnavailable {
                reason: format!("Malformed mapping row: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            match row.into_work_item() {
                Some(item) => items.push(item),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped = dropped, "Dropped mapping rows without an input location");
        }
        Ok(Self { items })
    }

    /// Distinct form titles in first-appearance order.
    #[must_use]
    pub fn form_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = Vec::new();
        for item in &self.items {
            if !titles.iter().any(|title| title.as_str() == item.form_title()) {
                titles.push(item.form_title().to_string());
            }
        }
        titles
    }

    /// Items belonging to `form_title`, in catalog order.
    #[must_use]
    pub fn items_for_form(&self, form_title: &str) -> Vec<WorkItem> {
        self.items
            .iter()
            .filter(|item| item.form_title() == form_title)
            .cloned()
            .collect()
    }

    /// Total number of items across all forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the mapping yielded no usable rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
