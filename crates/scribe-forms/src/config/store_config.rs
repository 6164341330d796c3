use crate::config::{default_bucket, default_sessions_prefix};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the filesystem-backed object store.
    pub data_dir: PathBuf,
    /// Bucket holding audio, transcripts and session records.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Key prefix under which session records are written.
    #[serde(default = "default_sessions_prefix")]
    pub sessions_prefix: String,
}
