//! Configuration management for scribe-forms.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{CatalogConfig, ReviewConfig, ServerConfig, StoreConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use crate::config::{
    DEFAULT_BUCKET, DEFAULT_ITEMS_PER_PAGE, DEFAULT_MAPPING_KEY, DEFAULT_PORT,
    DEFAULT_SESSIONS_PREFIX, DEFAULT_URL_TTL_SECONDS, default_languages,
};
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Object store configuration.
    pub store: StoreConfig,
    /// Transcription catalog configuration.
    pub catalog: CatalogConfig,
    /// Review page settings.
    pub review: ReviewConfig,
    /// Review web server configuration.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Note: This does NOT check that the store directory exists. Call
    /// `ensure_data_dir()` before serving so empty installs start with a
    /// usable store root instead of failing on the first write.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Create the store root directory if it does not exist yet.
    ///
    /// Call this before serving, not at config load time, so `load()`
    /// stays side-effect free on the data directory.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        if !self.store.data_dir.exists() {
            fs::create_dir_all(&self.store.data_dir)?;
            debug!(data_dir = ?self.store.data_dir, "Created store root directory");
        }
        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Get the review server URL for opening in a browser.
    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }

    /// Base URL under which the store's objects are served.
    ///
    /// Signed links produced by the filesystem store resolve here.
    pub fn media_base_url(&self) -> String {
        format!("{}/media", self.server_url())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "scribe-forms", "Scribe-Forms").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get config directory".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs =
            ProjectDirs::from("com", "scribe-forms", "Scribe-Forms").ok_or_else(|| {
                AppError::ConfigError {
                    reason: "Failed to get project directories".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        let data_dir = proj_dirs.data_dir().join("store");

        let config = Config {
            store: StoreConfig {
                data_dir: data_dir.clone(),
                bucket: DEFAULT_BUCKET.to_string(),
                sessions_prefix: DEFAULT_SESSIONS_PREFIX.to_string(),
            },
            catalog: CatalogConfig {
                languages: default_languages(),
                mapping_key: DEFAULT_MAPPING_KEY.to_string(),
            },
            review: ReviewConfig {
                items_per_page: DEFAULT_ITEMS_PER_PAGE,
                url_ttl_seconds: DEFAULT_URL_TTL_SECONDS,
            },
            server: ServerConfig { port: DEFAULT_PORT },
        };

        config.save()?;

        warn!(
            data_dir = ?data_dir,
            "Default config created. Mapping CSVs must be placed in the store before review."
        );

        Ok(config)
    }
}
