/// A `scheme://bucket/key` object location split into its parts.
///
/// Work-item rows carry audio and transcript locations as full URIs;
/// the scheme is irrelevant to the store capability, which addresses
/// everything as bucket + key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    bucket: String,
    key: String,
}

impl StoreLocation {
    /// Parse a location of the form `scheme://bucket/key`.
    ///
    /// Returns `None` when the scheme separator, the bucket or the key
    /// is missing. Absent or malformed locations are an expected
    /// condition (rendered as "no link"), never an error.
    pub fn parse(location: &str) -> Option<Self> {
        let rest = location.split_once("://")?.1;
        let (bucket, key) = rest.split_once('/')?;
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Bucket component.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key component: everything after the bucket.
    pub fn key(&self) -> &str {
        &self.key
    }
}
