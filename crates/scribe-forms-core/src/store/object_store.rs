//! Capability interface over the blob store holding audio, machine
//! transcripts and session records.
//!
//! The trait mirrors the small slice of an S3-style API the review flow
//! needs. Implementations are blocking; async callers offload calls at
//! their own seam.

use crate::CoreResult;

use std::time::Duration;

/// Blocking object-store capability.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ObjectNotFound`] when the key does not
    /// exist, [`CoreError::StoreUnavailable`] when the backend cannot
    /// be reached.
    ///
    /// [`CoreError::ObjectNotFound`]: crate::CoreError::ObjectNotFound
    /// [`CoreError::StoreUnavailable`]: crate::CoreError::StoreUnavailable
    fn get_object(&self, bucket: &str, key: &str) -> CoreResult<Vec<u8>>;

    /// Store an object's bytes, replacing any previous content.
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> CoreResult<()>;

    /// List keys under a prefix, lexicographically ordered.
    ///
    /// A prefix with no matches (including a bucket that does not exist
    /// yet) lists as empty rather than failing.
    fn list_objects(&self, bucket: &str, prefix: &str) -> CoreResult<Vec<String>>;

    /// Produce a time-limited display URL for an object.
    ///
    /// Returns `Ok(None)` when the backend cannot sign links (missing
    /// credentials, or a backend with no link concept); callers treat
    /// that as "no link", never as a failure.
    fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> CoreResult<Option<String>>;
}
