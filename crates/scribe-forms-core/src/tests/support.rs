//! Store doubles shared across the suite.

use crate::{CoreError, CoreResult, MemoryObjectStore, ObjectStore};

use std::{panic::Location, sync::Mutex, time::Duration};

use error_location::ErrorLocation;

fn unavailable(reason: &str) -> CoreError {
    CoreError::StoreUnavailable {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Store whose every operation fails with `StoreUnavailable`, as if the
/// backend were unreachable.
pub(crate) struct OfflineStore;

impl ObjectStore for OfflineStore {
    fn get_object(&self, _bucket: &str, _key: &str) -> CoreResult<Vec<u8>> {
        Err(unavailable("store offline"))
    }

    fn put_object(&self, _bucket: &str, _key: &str, _body: &[u8]) -> CoreResult<()> {
        Err(unavailable("store offline"))
    }

    fn list_objects(&self, _bucket: &str, _prefix: &str) -> CoreResult<Vec<String>> {
        Err(unavailable("store offline"))
    }

    fn signed_url(
        &self,
        _bucket: &str,
        _key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> CoreResult<Option<String>> {
        Err(unavailable("store offline"))
    }
}

/// Store that serves reads from an in-memory store but rejects writes.
pub(crate) struct ReadOnlyStore {
    inner: MemoryObjectStore,
}

impl ReadOnlyStore {
    pub(crate) fn new(inner: MemoryObjectStore) -> Self {
        Self { inner }
    }
}

impl ObjectStore for ReadOnlyStore {
    fn get_object(&self, bucket: &str, key: &str) -> CoreResult<Vec<u8>> {
        self.inner.get_object(bucket, key)
    }

    fn put_object(&self, _bucket: &str, _key: &str, _body: &[u8]) -> CoreResult<()> {
        Err(unavailable("writes rejected"))
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> CoreResult<Vec<String>> {
        self.inner.list_objects(bucket, prefix)
    }

    fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> CoreResult<Option<String>> {
        self.inner.signed_url(bucket, key, content_type, ttl)
    }
}

/// Store that records every `get_object` call so tests can assert which
/// objects were (not) fetched.
pub(crate) struct RecordingStore {
    inner: MemoryObjectStore,
    fetched: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub(crate) fn new(inner: MemoryObjectStore) -> Self {
        Self {
            inner,
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// `bucket/key` of every fetch so far, in call order.
    pub(crate) fn fetched_keys(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl ObjectStore for RecordingStore {
    fn get_object(&self, bucket: &str, key: &str) -> CoreResult<Vec<u8>> {
        self.fetched
            .lock()
            .unwrap()
            .push(format!("{}/{}", bucket, key));
        self.inner.get_object(bucket, key)
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> CoreResult<()> {
        self.inner.put_object(bucket, key, body)
    }

    fn list_objects(&self, bucket: &str, prefix: &str) -> CoreResult<Vec<String>> {
        self.inner.list_objects(bucket, prefix)
    }

    fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> CoreResult<Option<String>> {
        self.inner.signed_url(bucket, key, content_type, ttl)
    }
}
