//! Directory-backed object store for local deployments and tests.
//!
//! Objects live at `<root>/<bucket>/<key>`; writes are atomic
//! (temp file + rename) so a crash mid-save never leaves a torn
//! session record behind.

use crate::{CoreError, CoreResult, store::ObjectStore};

use std::{
    fs,
    io::{ErrorKind, Write},
    panic::Location,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Object store over a local directory tree.
pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FsObjectStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created lazily on first write; a missing root
    /// simply lists and reads as empty.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            public_base_url: None,
        }
    }

    /// Serve signed URLs as `{base}/{bucket}/{key}` instead of
    /// `file://` paths.
    ///
    /// The hosting application points this at a route that serves the
    /// store root (e.g. its static-file mount).
    #[must_use]
    pub fn with_public_base_url<S: Into<String>>(mut self, base: S) -> Self {
        self.public_base_url = Some(base.into());
        self
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `bucket`/`key` to a path strictly inside the root.
    #[track_caller]
    fn object_path(&self, bucket: &str, key: &str) -> CoreResult<PathBuf> {
        let relative = Path::new(bucket).join(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if bucket.is_empty() || key.is_empty() || escapes {
            return Err(CoreError::StoreUnavailable {
                reason: format!("path escapes store root: {bucket}/{key}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FsObjectStore {
    #[instrument(skip(self))]
    fn get_object(&self, bucket: &str, key: &str) -> CoreResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(bucket, key, len = bytes.len(), "Object read");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(CoreError::StoreUnavailable {
                reason: format!("failed to read {}: {}", path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[instrument(skip(self, body))]
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> CoreResult<()> {
        let path = self.object_path(bucket, key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::StoreUnavailable {
                reason: format!("failed to create {}: {}", parent.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        // Atomic write: write to temp file then rename
        let mut temp_os = path.clone().into_os_string();
        temp_os.push(".part");
        let temp_path = PathBuf::from(temp_os);

        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| CoreError::StoreUnavailable {
                reason: format!("failed to create {}: {}", temp_path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file
            .write_all(body)
            .map_err(|e| CoreError::StoreUnavailable {
                reason: format!("failed to write {}: {}", temp_path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file
            .sync_all()
            .map_err(|e| CoreError::StoreUnavailable {
                reason: format!("failed to sync {}: {}", temp_path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        fs::rename(&temp_path, &path).map_err(|e| CoreError::StoreUnavailable {
            reason: format!("failed to rename into {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(bucket, key, len = body.len(), "Object written");

        Ok(())
    }

    #[instrument(skip(self))]
    fn list_objects(&self, bucket: &str, prefix: &str) -> CoreResult<Vec<String>> {
        let bucket_dir = self.root.join(bucket);
        if !bucket_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        collect_keys(&bucket_dir, &bucket_dir, &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();

        debug!(bucket, prefix, count = keys.len(), "Objects listed");

        Ok(keys)
    }

    fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> CoreResult<Option<String>> {
        // No expiry enforcement on a local tree; the TTL is accepted for
        // interface compatibility and ignored.
        let url = match &self.public_base_url {
            Some(base) => format!("{}/{}/{}", base.trim_end_matches('/'), bucket, key),
            None => format!("file://{}", self.object_path(bucket, key)?.display()),
        };
        Ok(Some(url))
    }
}

/// Walk `dir` recursively, pushing each file's bucket-relative key
/// ( `/`-separated) into `keys`.
fn collect_keys(bucket_dir: &Path, dir: &Path, keys: &mut Vec<String>) -> CoreResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| CoreError::StoreUnavailable {
        reason: format!("failed to list {}: {}", dir.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| CoreError::StoreUnavailable {
            reason: format!("failed to list {}: {}", dir.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_keys(bucket_dir, &path, keys)?;
        } else if let Ok(relative) = path.strip_prefix(bucket_dir) {
            // In-flight atomic-write temp files are not real objects.
            if path.extension().is_some_and(|ext| ext == "part") {
                continue;
            }
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            keys.push(key);
        }
    }

    Ok(())
}
