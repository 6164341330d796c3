//! One-shot state machine driving session selection for one interaction.

use crate::{
    CoreError, CoreResult,
    session::{AnnotatorName, SessionId, SessionStore},
};

use std::panic::Location;

use chrono::{DateTime, Local};
use error_location::ErrorLocation;
use tracing::{info, instrument};

/// The continue-or-new decision inside `AwaitingSessionDecision`.
///
/// A single tagged value instead of a pair of flags: the two paths are
/// mutually exclusive and cannot both be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChoice {
    /// Neither path has been taken yet.
    Unresolved,
    /// *Continue previous* was taken; holds the discovered candidates.
    /// Empty means there is nothing to resume, which is guidance for the
    /// annotator, not an error.
    Resuming(Vec<SessionId>),
    /// *Start new* was taken; holds the freshly minted identifier.
    Fresh(SessionId),
}

/// Progress of one session-selection interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverState {
    /// No form or annotator chosen yet.
    NoSelection,
    /// Form and annotator are known; the decision surface comes next.
    FormChosen {
        /// The chosen form title.
        form_title: String,
        /// The normalized annotator name.
        annotator: AnnotatorName,
    },
    /// Waiting on the continue-or-new decision.
    AwaitingSessionDecision {
        /// The chosen form title.
        form_title: String,
        /// The normalized annotator name.
        annotator: AnnotatorName,
        /// The decision taken so far.
        choice: SessionChoice,
    },
    /// A session is active; items can be reviewed and saved.
    SessionActive {
        /// The chosen form title.
        form_title: String,
        /// The normalized annotator name.
        annotator: AnnotatorName,
        /// The active session identifier.
        session_id: SessionId,
    },
}

/// Drives `NoSelection -> FormChosen -> AwaitingSessionDecision ->
/// SessionActive` for one interaction.
///
/// Transitions are one-shot: each action is valid from exactly one state,
/// and there is no path backwards. A caller that wants to revisit a
/// decision starts a new resolver. Actions from the wrong state fail with
/// [`CoreError::InvalidTransition`] and leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResolver {
    state: ResolverState,
}

impl SessionResolver {
    /// A resolver with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ResolverState::NoSelection,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// The chosen form title, once one is known.
    #[must_use]
    pub fn form_title(&self) -> Option<&str> {
        match &self.state {
            ResolverState::NoSelection => None,
            ResolverState::FormChosen { form_title, .. }
            | ResolverState::AwaitingSessionDecision { form_title, .. }
            | ResolverState::SessionActive { form_title, .. } => Some(form_title),
        }
    }

    /// The normalized annotator name, once one is known.
    #[must_use]
    pub fn annotator(&self) -> Option<&AnnotatorName> {
        match &self.state {
            ResolverState::NoSelection => None,
            ResolverState::FormChosen { annotator, .. }
            | ResolverState::AwaitingSessionDecision { annotator, .. }
            | ResolverState::SessionActive { annotator, .. } => Some(annotator),
        }
    }

    /// The resume candidates, while the *Continue previous* path is live.
    #[must_use]
    pub fn candidates(&self) -> Option<&[SessionId]> {
        match &self.state {
            ResolverState::AwaitingSessionDecision {
                choice: SessionChoice::Resuming(candidates),
                ..
            } => Some(candidates),
            _ => None,
        }
    }

    /// The active session identifier, once a session is active.
    #[must_use]
    pub fn active_session(&self) -> Option<&SessionId> {
        match &self.state {
            ResolverState::SessionActive { session_id, .. } => Some(session_id),
            _ => None,
        }
    }

    /// Records the form title and annotator for this interaction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAnnotator`] when the name normalizes to
    /// nothing (the state stays `NoSelection`), or
    /// [`CoreError::InvalidTransition`] when a form was already chosen.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn choose_form(&mut self, form_title: &str, raw_annotator: &str) -> CoreResult<()> {
        if !matches!(self.state, ResolverState::NoSelection) {
            return Err(self.invalid("choose a form"));
        }
        let annotator = AnnotatorName::parse(raw_annotator)?;
        self.state = ResolverState::FormChosen {
            form_title: form_title.to_string(),
            annotator,
        };
        Ok(())
    }

    /// Moves onto the decision surface.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless a form was just
    /// chosen.
    #[track_caller]
    pub fn begin(&mut self) -> CoreResult<()> {
        let (form_title, annotator) = match &self.state {
            ResolverState::FormChosen {
                form_title,
                annotator,
            } => (form_title.clone(), annotator.clone()),
            _ => return Err(self.invalid("begin the session decision")),
        };
        self.state = ResolverState::AwaitingSessionDecision {
            form_title,
            annotator,
            choice: SessionChoice::Unresolved,
        };
        Ok(())
    }

    /// Takes the *Continue previous* path: discovers resumable sessions.
    ///
    /// Zero candidates is not an error; the returned choice carries an
    /// empty list and the surface shows "nothing to resume" guidance. The
    /// decision is one-shot: once this path is taken, the interaction
    /// cannot fall back to undecided.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the decision is
    /// still unresolved, or [`CoreError::StoreUnavailable`] when discovery
    /// itself fails.
    #[track_caller]
    #[instrument(skip(self, sessions))]
    pub fn continue_previous(&mut self, sessions: &SessionStore) -> CoreResult<SessionChoice> {
        let (form_title, annotator) = match &self.state {
            ResolverState::AwaitingSessionDecision {
                form_title,
                annotator,
                choice: SessionChoice::Unresolved,
            } => (form_title.clone(), annotator.clone()),
            _ => return Err(self.invalid("list previous sessions")),
        };
        let candidates = sessions.list_previous(&form_title, &annotator)?;
        info!(
            form_title = %form_title,
            annotator = %annotator,
            candidates = candidates.len(),
            "Resume path taken"
        );
        let choice = SessionChoice::Resuming(candidates);
        self.state = ResolverState::AwaitingSessionDecision {
            form_title,
            annotator,
            choice: choice.clone(),
        };
        Ok(choice)
    }

    /// Activates one of the discovered candidates.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the *Continue
    /// previous* path is live, or [`CoreError::UnknownSession`] when
    /// `session_id` was not among the candidates (the state is left
    /// untouched so another candidate can be selected).
    #[track_caller]
    #[instrument(skip(self))]
    pub fn select_session(&mut self, session_id: &SessionId) -> CoreResult<()> {
        let (form_title, annotator) = match &self.state {
            ResolverState::AwaitingSessionDecision {
                form_title,
                annotator,
                choice: SessionChoice::Resuming(candidates),
            } => {
                if !candidates.contains(session_id) {
                    return Err(CoreError::UnknownSession {
                        session_id: session_id.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                (form_title.clone(), annotator.clone())
            }
            _ => return Err(self.invalid("select a session")),
        };
        info!(session_id = %session_id, "Resuming session");
        self.state = ResolverState::SessionActive {
            form_title,
            annotator,
            session_id: session_id.clone(),
        };
        Ok(())
    }

    /// Takes the *Start new* path with the current wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the decision is
    /// still unresolved.
    #[track_caller]
    pub fn start_new(&mut self) -> CoreResult<SessionChoice> {
        self.start_new_at(Local::now())
    }

    /// Takes the *Start new* path, minting `{annotator}_{now}_{form}`.
    ///
    /// The timestamp has second granularity, so two sessions started by
    /// the same annotator for the same form within one second share an
    /// identifier; the later record overwrites the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the decision is
    /// still unresolved.
    #[track_caller]
    #[instrument(skip(self, now))]
    pub fn start_new_at(&mut self, now: DateTime<Local>) -> CoreResult<SessionChoice> {
        let (form_title, annotator) = match &self.state {
            ResolverState::AwaitingSessionDecision {
                form_title,
                annotator,
                choice: SessionChoice::Unresolved,
            } => (form_title.clone(), annotator.clone()),
            _ => return Err(self.invalid("start a new session")),
        };
        let session_id = SessionId::fresh_at(&annotator, &form_title, now);
        info!(session_id = %session_id, "Starting new session");
        self.state = ResolverState::SessionActive {
            form_title,
            annotator,
            session_id: session_id.clone(),
        };
        Ok(SessionChoice::Fresh(session_id))
    }

    fn state_name(&self) -> &'static str {
        match &self.state {
            ResolverState::NoSelection => "NoSelection",
            ResolverState::FormChosen { .. } => "FormChosen",
            ResolverState::AwaitingSessionDecision { .. } => "AwaitingSessionDecision",
            ResolverState::SessionActive { .. } => "SessionActive",
        }
    }

    #[track_caller]
    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            state: self.state_name(),
            action,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new()
    }
}
