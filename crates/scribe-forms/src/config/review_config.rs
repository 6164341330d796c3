use crate::config::{default_items_per_page, default_url_ttl_seconds};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Review page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Number of work items shown per page.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Lifetime of signed audio links, in seconds.
    #[serde(default = "default_url_ttl_seconds")]
    pub url_ttl_seconds: u64,
}

impl ReviewConfig {
    /// Signed-link lifetime as a `Duration`.
    pub fn url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_ttl_seconds)
    }
}
