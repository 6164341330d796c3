//! Session identity, durable records, and the selection state machine.

mod id;
mod record;
mod resolver;
mod store;

pub use {
    id::{AnnotatorName, SessionId},
    record::{CorrectionEntry, Session},
    resolver::{ResolverState, SessionChoice, SessionResolver},
    store::SessionStore,
};
