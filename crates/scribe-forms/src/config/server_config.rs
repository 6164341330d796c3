use crate::config::default_port;

use serde::{Deserialize, Serialize};

/// Review web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the review server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}
