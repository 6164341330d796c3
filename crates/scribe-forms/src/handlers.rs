//! Request handlers for the review surface.
//!
//! Handlers decode their parameters, run the blocking core work through
//! `run_blocking`, and render. Failures that block a page degrade to
//! inline guidance rather than bare error statuses, so the annotator
//! always lands on a page that says what happened.

use crate::{
    AppError,
    render::{self, PageNotice},
    server::{AppState, run_blocking},
};

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use scribe_forms_core::{
    AnnotationController, CoreError, SessionChoice, SessionId, SessionResolver, WorkItem,
    WorkItemCatalog,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

const BLANK_NAME_GUIDANCE: &str = "Annotator name cannot be blank.";

/// Query parameters selecting a language.
#[derive(Debug, Deserialize)]
pub(crate) struct LanguageParams {
    language: String,
}

/// Parameters carried from form selection through session activation.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionParams {
    language: String,
    form: String,
    name: String,
}

/// Parameters addressing one review page.
#[derive(Debug, Deserialize)]
pub(crate) struct PageParams {
    language: String,
    form: String,
    name: String,
    session: String,
    #[serde(default = "first_page")]
    page: usize,
    /// Display title of a just-saved item, set by the save redirect.
    saved: Option<String>,
}

/// Form body for one correction submission.
#[derive(Debug, Deserialize)]
pub(crate) struct SaveParams {
    language: String,
    form: String,
    name: String,
    session: String,
    #[serde(default = "first_page")]
    page: usize,
    key: String,
    corrected: String,
}

fn first_page() -> usize {
    1
}

/// Landing page: the configured language list.
pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::language_page(&state.config.catalog.languages))
}

/// Form-title selector for one language.
#[instrument(skip(state))]
pub(crate) async fn select_form(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageParams>,
) -> Html<String> {
    match state.catalog_for(&params.language).await {
        Ok(catalog) => Html(render::form_page(&params.language, &catalog.form_titles())),
        Err(e) => {
            warn!(language = %params.language, error = %e, "Catalog unavailable");
            Html(render::language_unavailable_page(&params.language))
        }
    }
}

/// The one-shot decision surface: continue a previous session or start new.
#[instrument]
pub(crate) async fn session_decision(Query(params): Query<SessionParams>) -> Html<String> {
    // Validates the annotator name before offering either path.
    let mut resolver = SessionResolver::new();
    if let Err(e) = resolver.choose_form(&params.form, &params.name) {
        warn!(error = %e, "Rejected annotator name");
        return Html(render::invalid_name_page(&params.language, BLANK_NAME_GUIDANCE));
    }

    Html(render::session_page(
        &params.language,
        &params.form,
        &params.name,
    ))
}

/// Resumable-session candidates for the chosen form and annotator.
#[instrument(skip(state))]
pub(crate) async fn session_resume(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SessionParams>,
) -> Html<String> {
    let sessions = state.sessions.clone();
    let form = params.form.clone();
    let name = params.name.clone();

    let discovered = run_blocking(move || {
        let mut resolver = SessionResolver::new();
        resolver.choose_form(&form, &name)?;
        resolver.begin()?;
        match resolver.continue_previous(&sessions)? {
            SessionChoice::Resuming(candidates) => Ok(candidates),
            SessionChoice::Unresolved | SessionChoice::Fresh(_) => Ok(Vec::new()),
        }
    })
    .await;

    match discovered {
        Ok(candidates) => Html(render::resume_page(
            &params.language,
            &params.form,
            &params.name,
            &candidates,
        )),
        Err(AppError::Core {
            source: CoreError::InvalidAnnotator { .. },
            ..
        }) => Html(render::invalid_name_page(&params.language, BLANK_NAME_GUIDANCE)),
        Err(e) => {
            warn!(error = %e, "Session discovery failed");
            Html(render::error_page("Could not list previous sessions."))
        }
    }
}

/// Mint a fresh session and land on page 1.
#[instrument]
pub(crate) async fn session_new(Form(params): Form<SessionParams>) -> Response {
    let mut resolver = SessionResolver::new();

    if let Err(e) = resolver.choose_form(&params.form, &params.name) {
        warn!(error = %e, "Rejected annotator name");
        return Html(render::invalid_name_page(&params.language, BLANK_NAME_GUIDANCE))
            .into_response();
    }

    let activated = resolver.begin().and_then(|()| resolver.start_new());
    match activated {
        Ok(SessionChoice::Fresh(session_id)) => {
            info!(session_id = %session_id, form = %params.form, "Started new session");
            Redirect::to(&render::page_url(
                &params.language,
                &params.form,
                &params.name,
                session_id.as_str(),
                1,
            ))
            .into_response()
        }
        Ok(SessionChoice::Unresolved | SessionChoice::Resuming(_)) | Err(_) => {
            warn!(form = %params.form, "Session activation refused");
            Html(render::error_page("Could not start a session.")).into_response()
        }
    }
}

/// One page of review items.
#[instrument(skip(state))]
pub(crate) async fn review_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    let catalog = match state.catalog_for(&params.language).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(language = %params.language, error = %e, "Catalog unavailable");
            return Html(render::language_unavailable_page(&params.language));
        }
    };

    let controller =
        review_controller(&state, catalog.items_for_form(&params.form), &params.session);
    let page = params.page;
    let view = run_blocking(move || Ok(controller.render_page(page))).await;

    match view {
        Ok(view) => {
            let notice = page_notice(&params);
            Html(render::review_page(
                &params.language,
                &params.form,
                &params.name,
                &params.session,
                &view,
                notice.as_ref(),
            ))
        }
        Err(e) => {
            warn!(error = %e, "Page render task failed");
            Html(render::error_page("Could not render this page."))
        }
    }
}

/// Persist one correction, then bounce back to the page with a notice.
#[instrument(skip(state, params))]
pub(crate) async fn save_correction(
    State(state): State<Arc<AppState>>,
    Form(params): Form<SaveParams>,
) -> Response {
    let catalog = match state.catalog_for(&params.language).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(language = %params.language, error = %e, "Catalog unavailable");
            return Html(render::language_unavailable_page(&params.language)).into_response();
        }
    };

    let items = catalog.items_for_form(&params.form);
    let title = items
        .iter()
        .find(|item| item.input_location() == params.key.as_str())
        .map(WorkItem::display_name)
        .unwrap_or_else(|| params.key.clone());

    let controller = review_controller(&state, items, &params.session);
    let key = params.key.clone();
    let corrected = params.corrected.clone();
    let saved = run_blocking(move || controller.save_correction(&key, &corrected)).await;

    match saved {
        Ok(()) => {
            info!(key = %params.key, session = %params.session, "Correction saved");
            let base = render::page_url(
                &params.language,
                &params.form,
                &params.name,
                &params.session,
                params.page,
            );
            Redirect::to(&format!("{}&saved={}", base, render::encode_query(&title)))
                .into_response()
        }
        Err(e) => {
            warn!(key = %params.key, session = %params.session, error = %e, "Save failed");
            // Re-render in place so the attempted text survives the failure
            // and can be resubmitted.
            let notice = PageNotice::Failed {
                reason: save_failure_reason(&e),
            };
            failed_save_page(&state, &catalog, &params, notice).await.into_response()
        }
    }
}

/// Render the review page after a rejected save, with the submitted text
/// restored into its edit field.
async fn failed_save_page(
    state: &AppState,
    catalog: &WorkItemCatalog,
    params: &SaveParams,
    notice: PageNotice,
) -> Html<String> {
    let controller =
        review_controller(state, catalog.items_for_form(&params.form), &params.session);
    let page = params.page;
    let view = run_blocking(move || Ok(controller.render_page(page))).await;

    match view {
        Ok(mut view) => {
            for item in &mut view.items {
                if item.key == params.key {
                    item.corrected_text = params.corrected.clone();
                }
            }
            Html(render::review_page(
                &params.language,
                &params.form,
                &params.name,
                &params.session,
                &view,
                Some(&notice),
            ))
        }
        Err(e) => {
            warn!(error = %e, "Page render task failed");
            Html(render::error_page("Could not render this page."))
        }
    }
}

fn review_controller(
    state: &AppState,
    items: Vec<WorkItem>,
    session: &str,
) -> AnnotationController {
    AnnotationController::new(
        Arc::clone(&state.store),
        state.sessions.clone(),
        SessionId::from_stored(session),
        items,
        state.config.review.items_per_page,
        state.config.review.url_ttl(),
    )
}

fn page_notice(params: &PageParams) -> Option<PageNotice> {
    params.saved.as_ref().map(|title| PageNotice::Saved {
        title: title.clone(),
    })
}

fn save_failure_reason(error: &AppError) -> String {
    match error {
        AppError::Core {
            source: CoreError::UnknownWorkItem { .. },
            ..
        } => "this item is not part of the form".to_string(),
        AppError::Core { source, .. } if source.is_store_unavailable() => {
            "the record store is unreachable".to_string()
        }
        _ => "an unexpected error occurred".to_string(),
    }
}
