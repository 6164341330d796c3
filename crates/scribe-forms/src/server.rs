//! HTTP server wiring for the review surface.
//!
//! Holds the shared application state, the router, and the seam that moves
//! blocking core calls off the async worker threads.

use crate::{AppError, AppResult, config::Config, handlers};

use std::{panic::Location, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use error_location::ErrorLocation;
use scribe_forms_core::{CoreResult, ObjectStore, SessionStore, WorkItemCatalog};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, instrument};

/// Application state shared across handlers.
pub(crate) struct AppState {
    /// Loaded configuration, fixed for the process lifetime.
    pub(crate) config: Config,
    /// Backing object store for audio, transcripts and session records.
    pub(crate) store: Arc<dyn ObjectStore>,
    /// Session record reader and writer over the store.
    pub(crate) sessions: SessionStore,
    /// The one cached catalog, keyed by the language it was loaded for.
    catalog: Mutex<Option<(String, Arc<WorkItemCatalog>)>>,
}

impl AppState {
    pub(crate) fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let sessions = SessionStore::new(
            Arc::clone(&store),
            config.store.bucket.clone(),
            config.store.sessions_prefix.clone(),
        );

        Self {
            config,
            store,
            sessions,
            catalog: Mutex::new(None),
        }
    }

    /// Catalog for `language`, loading it on first use.
    ///
    /// Only the most recently used language stays cached; switching
    /// languages replaces the cache wholesale.
    #[instrument(skip(self))]
    pub(crate) async fn catalog_for(&self, language: &str) -> AppResult<Arc<WorkItemCatalog>> {
        {
            let cached = self.catalog.lock().await;
            if let Some((cached_language, catalog)) = cached.as_ref() {
                if cached_language == language {
                    return Ok(Arc::clone(catalog));
                }
            }
        }

        let store = Arc::clone(&self.store);
        let bucket = self.config.store.bucket.clone();
        let key = self.config.catalog.key_for_language(language);
        let catalog = run_blocking(move || {
            WorkItemCatalog::load(store.as_ref(), &bucket, &key).map(Arc::new)
        })
        .await?;

        info!(language = %language, items = catalog.len(), "Catalog loaded");

        let mut cached = self.catalog.lock().await;
        *cached = Some((language.to_string(), Arc::clone(&catalog)));

        Ok(catalog)
    }
}

/// Run a blocking core call on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("blocking task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(outcome?)
}

/// Create the application router.
///
/// # Routes
///
/// - `GET /` - language selector
/// - `GET /review?language=` - form-title selector and annotator name
/// - `GET /review/session?language&form&name` - session decision surface
/// - `GET /review/session/resume?language&form&name` - resumable sessions
/// - `POST /review/session/new` - mint a fresh session
/// - `GET /review/page?language&form&name&session&page=N` - one review page
/// - `POST /review/save` - persist one correction
/// - `GET /media/{bucket}/{key...}` - static files from the store root
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let media = ServeDir::new(state.config.store.data_dir.clone());

    Router::new()
        .route("/", get(handlers::index))
        .route("/review", get(handlers::select_form))
        .route("/review/session", get(handlers::session_decision))
        .route("/review/session/resume", get(handlers::session_resume))
        .route("/review/session/new", post(handlers::session_new))
        .route("/review/page", get(handlers::review_page))
        .route("/review/save", post(handlers::save_correction))
        .nest_service("/media", media)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind on localhost and serve until the process is stopped.
pub(crate) async fn serve(state: Arc<AppState>) -> AppResult<()> {
    let addr = format!("127.0.0.1:{}", state.config.server.port);
    let app = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("failed to bind {}: {}", addr, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!(addr = %addr, url = %state.config.server_url(), "Review server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("server stopped: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}
