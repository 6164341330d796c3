//! In-memory object store used by tests and local development.

use std::{collections::BTreeMap, panic::Location, sync::Mutex, time::Duration};

use error_location::ErrorLocation;
use tracing::debug;

use crate::{
    error::{CoreError, Result},
    store::ObjectStore,
};

/// Object store backed by a process-local map.
///
/// Keys are held per bucket and listed in lexicographic order, matching the
/// ordering contract of [`ObjectStore::list_objects`]. The store cannot mint
/// browser-reachable URLs, so [`ObjectStore::signed_url`] always reports
/// `None`.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a single object, replacing any previous body under the same key.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        let mut objects = self
            .objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects.insert((bucket.to_string(), key.to_string()), body.into());
    }

    /// Number of stored objects across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// True when no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let objects = self
            .objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| CoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        let mut objects = self
            .objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!(bucket = %bucket, key = %key, bytes = body.len(), "Storing object in memory");
        objects.insert((bucket.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let objects = self
            .objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect())
    }

    fn signed_url(
        &self,
        _bucket: &str,
        _key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> Result<Option<String>> {
        Ok(None)
    }
}
