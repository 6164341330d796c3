use crate::config::{default_languages, default_mapping_key};

use serde::{Deserialize, Serialize};

/// Transcription catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Languages offered on the landing page.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Key template for the per-language mapping CSV.
    ///
    /// `{language}` is substituted with the selected language.
    #[serde(default = "default_mapping_key")]
    pub mapping_key: String,
}

impl CatalogConfig {
    /// Resolve the mapping object key for one language.
    pub fn key_for_language(&self, language: &str) -> String {
        self.mapping_key.replace("{language}", language)
    }
}
