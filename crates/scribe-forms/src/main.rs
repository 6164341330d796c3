//! Scribe Forms: paginated human review of machine transcription output.

mod config;
mod error;
mod handlers;
mod render;
mod server;

pub(crate) use error::{AppError, Result as AppResult};

use crate::config::Config;
use crate::server::AppState;

use std::sync::Arc;

use scribe_forms_core::{FsObjectStore, ObjectStore};
use tracing::error;

/// Application entry point.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("scribe_forms=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.ensure_data_dir() {
        error!("Failed to prepare store directory: {:?}", e);
        std::process::exit(1);
    }

    // Signed links point back at this server's /media routes.
    let store: Arc<dyn ObjectStore> = Arc::new(
        FsObjectStore::new(config.store.data_dir.clone())
            .with_public_base_url(config.media_base_url()),
    );

    let state = Arc::new(AppState::new(config, store));

    if let Err(e) = server::serve(state).await {
        error!("Server failed: {:?}", e);
        std::process::exit(1);
    }
}
