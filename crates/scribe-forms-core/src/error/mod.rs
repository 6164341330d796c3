use error_location::ErrorLocation;
use thiserror::Error;

/// Review-core errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The tabular work-item source could not be fetched or parsed.
    #[error("Catalog unavailable: {reason} {location}")]
    CatalogUnavailable {
        /// Description of the load failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The object-store transport could not be reached.
    #[error("Store unavailable: {reason} {location}")]
    StoreUnavailable {
        /// Description of the transport failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The requested object does not exist in the store.
    #[error("Object not found: {bucket}/{key} {location}")]
    ObjectNotFound {
        /// Bucket that was queried.
        bucket: String,
        /// Key that was queried.
        key: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The annotator name is empty after normalization.
    #[error("Annotator name is empty after normalization {location}")]
    InvalidAnnotator {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A resolver action was requested from a state that does not allow it.
    #[error("Cannot {action} from state {state} {location}")]
    InvalidTransition {
        /// State the resolver was in.
        state: &'static str,
        /// Action that was attempted.
        action: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A session identifier was selected that discovery did not offer.
    #[error("Unknown session: {session_id} {location}")]
    UnknownSession {
        /// The identifier that was selected.
        session_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A correction was submitted for a key outside the active form.
    #[error("Unknown work item: {key} {location}")]
    UnknownWorkItem {
        /// The submitted item key.
        key: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Whether this error is the store-transport failure case.
    ///
    /// Read paths use this to decide between degrading to an empty
    /// session and propagating.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable { .. })
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
