//! Scribe-forms Core Library
//!
//! Session-centric correction of machine speech transcripts: per-language
//! work-item catalogs, durable correction records in an object store, and
//! the paging controller a review surface drives.
//!
//! # Example
//!
//! ```no_run
//! use scribe_forms_core::{
//!     AnnotationController, CoreResult, FsObjectStore, ObjectStore, SessionResolver,
//!     SessionStore, WorkItemCatalog,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new("/srv/scribe-data"));
//!     let sessions = SessionStore::new(store.clone(), "transcripts", "previous_sessions/");
//!     let catalog = WorkItemCatalog::load(
//!         store.as_ref(),
//!         "transcripts",
//!         "hausa_async_inference/mapping.csv",
//!     )?;
//!
//!     let mut resolver = SessionResolver::new();
//!     resolver.choose_form("form_A", "Jane Doe")?;
//!     resolver.begin()?;
//!     resolver.start_new()?;
//!
//!     if let Some(session_id) = resolver.active_session() {
//!         let controller = AnnotationController::new(
//!             store,
//!             sessions,
//!             session_id.clone(),
//!             catalog.items_for_form("form_A"),
//!             5,
//!             Duration::from_secs(3600),
//!         );
//!         let page = controller.render_page(1);
//!         for item in &page.items {
//!             println!("{}. {}", item.number, item.title);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod annotation;
mod catalog;
mod error;
mod session;
mod store;

pub use {
    annotation::{AnnotationController, ItemView, PageView, Pagination},
    catalog::{WorkItem, WorkItemCatalog},
    error::{CoreError, Result as CoreResult},
    session::{
        AnnotatorName, CorrectionEntry, ResolverState, Session, SessionChoice, SessionId,
        SessionResolver, SessionStore,
    },
    store::{FsObjectStore, MemoryObjectStore, ObjectStore, StoreLocation},
};
