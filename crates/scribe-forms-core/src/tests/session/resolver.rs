use crate::{
    CoreError, MemoryObjectStore, ResolverState, SessionChoice, SessionId, SessionResolver,
    SessionStore,
};

use std::sync::Arc;

use chrono::{Local, TimeZone};

// Test constants
const BUCKET: &str = "transcripts";
const PREFIX: &str = "previous_sessions/";
const FORM: &str = "form_A";

fn sessions_with(keys: &[&str]) -> SessionStore {
    let store = Arc::new(MemoryObjectStore::new());
    for key in keys {
        store.insert(BUCKET, key, b"{}".to_vec());
    }
    SessionStore::new(store, BUCKET, PREFIX)
}

fn awaiting_resolver() -> SessionResolver {
    let mut resolver = SessionResolver::new();
    resolver.choose_form(FORM, "Jane Doe").unwrap();
    resolver.begin().unwrap();
    resolver
}

/// WHAT: The fresh path activates a session with the minted identifier
/// WHY: Start-new is the one-click path from decision to working
#[test]
fn given_unresolved_decision_when_starting_new_then_session_active() {
    // Given: a resolver on the decision surface
    let mut resolver = awaiting_resolver();
    let now = Local.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap();

    // When: taking the fresh path
    let choice = resolver.start_new_at(now).unwrap();

    // Then: the choice carries the minted id and the session is active
    match choice {
        SessionChoice::Fresh(id) => {
            assert_eq!(id.as_str(), "janedoe_20260305_143000_form_A");
        }
        other => unreachable!("expected fresh choice, got {:?}", other),
    }
    assert_eq!(
        resolver.active_session().map(SessionId::as_str),
        Some("janedoe_20260305_143000_form_A")
    );
}

/// WHAT: The resume path discovers candidates and activates the selected one
/// WHY: Continue-previous is how multi-day work picks up where it stopped
#[test]
fn given_stored_sessions_when_resuming_then_candidate_selectable() {
    // Given: two resumable records and a resolver on the decision surface
    let sessions = sessions_with(&[
        "previous_sessions/janedoe_20260101_101010_form_A.json",
        "previous_sessions/janedoe_20260102_101010_form_A.json",
    ]);
    let mut resolver = awaiting_resolver();

    // When: taking the resume path and selecting the first candidate
    let choice = resolver.continue_previous(&sessions).unwrap();
    let candidates = match choice {
        SessionChoice::Resuming(candidates) => candidates,
        other => unreachable!("expected resuming choice, got {:?}", other),
    };
    assert_eq!(candidates.len(), 2);
    resolver.select_session(&candidates[0]).unwrap();

    // Then: the selected identifier is active
    assert_eq!(resolver.active_session(), Some(&candidates[0]));
}

/// WHAT: Zero candidates is guidance, not an error
/// WHY: "Nothing to resume" is an everyday state for new annotators
#[test]
fn given_no_stored_sessions_when_resuming_then_empty_candidates() {
    // Given: an empty store and a resolver on the decision surface
    let sessions = sessions_with(&[]);
    let mut resolver = awaiting_resolver();

    // When: taking the resume path
    let choice = resolver.continue_previous(&sessions).unwrap();

    // Then: the resume path holds an empty candidate list
    assert_eq!(choice, SessionChoice::Resuming(Vec::new()));
    assert_eq!(resolver.candidates(), Some(&[][..]));
}

/// WHAT: Selecting an identifier discovery never offered is rejected
/// WHY: The selection comes back over the wire and cannot be trusted
#[test]
fn given_resuming_when_selecting_unknown_id_then_rejected_state_kept() {
    // Given: a resolver holding one real candidate
    let sessions = sessions_with(&["previous_sessions/janedoe_20260101_101010_form_A.json"]);
    let mut resolver = awaiting_resolver();
    resolver.continue_previous(&sessions).unwrap();
    let forged = SessionId::from_stored("janedoe_20991231_235959_form_A");

    // When: selecting a forged identifier
    let result = resolver.select_session(&forged);

    // Then: rejected, and the real candidate is still selectable
    assert!(matches!(result, Err(CoreError::UnknownSession { .. })));
    let real = SessionId::from_stored("janedoe_20260101_101010_form_A");
    resolver.select_session(&real).unwrap();
    assert_eq!(resolver.active_session(), Some(&real));
}

/// WHAT: The continue and start-new paths are mutually exclusive
/// WHY: The decision is one-shot; a taken path cannot be swapped mid-way
#[test]
fn given_resume_path_taken_when_starting_new_then_invalid_transition() {
    // Given: a resolver that already took the resume path
    let sessions = sessions_with(&[]);
    let mut resolver = awaiting_resolver();
    resolver.continue_previous(&sessions).unwrap();

    // When: trying the other path
    let result = resolver.start_new();

    // Then: refused
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

/// WHAT: The resume path cannot be taken twice
/// WHY: One-shot means no second discovery within the interaction
#[test]
fn given_resume_path_taken_when_continuing_again_then_invalid_transition() {
    // Given: a resolver that already took the resume path
    let sessions = sessions_with(&[]);
    let mut resolver = awaiting_resolver();
    resolver.continue_previous(&sessions).unwrap();

    // When: taking it again
    let result = resolver.continue_previous(&sessions);

    // Then: refused
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

/// WHAT: Selecting before discovery ran is rejected
/// WHY: Candidates exist only after the resume path produced them
#[test]
fn given_unresolved_decision_when_selecting_then_invalid_transition() {
    // Given: a resolver that has not taken a path
    let mut resolver = awaiting_resolver();
    let id = SessionId::from_stored("janedoe_20260101_101010_form_A");

    // When: selecting anyway
    let result = resolver.select_session(&id);

    // Then: refused
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

/// WHAT: Skipping begin() leaves decision actions unavailable
/// WHY: Each transition is valid from exactly one state
#[test]
fn given_form_chosen_when_starting_new_then_invalid_transition() {
    // Given: a resolver that chose a form but never reached the decision
    let mut resolver = SessionResolver::new();
    resolver.choose_form(FORM, "Jane Doe").unwrap();

    // When: starting a session straight away
    let result = resolver.start_new();

    // Then: refused
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}

/// WHAT: A blank annotator name keeps the resolver at no-selection
/// WHY: The rejected name must not half-advance the interaction
#[test]
fn given_blank_annotator_when_choosing_form_then_rejected_and_retryable() {
    // Given: a fresh resolver
    let mut resolver = SessionResolver::new();

    // When: choosing with a blank name, then with a real one
    let result = resolver.choose_form(FORM, "   ");
    assert!(matches!(result, Err(CoreError::InvalidAnnotator { .. })));
    assert_eq!(resolver.state(), &ResolverState::NoSelection);
    resolver.choose_form(FORM, "Jane Doe").unwrap();

    // Then: the retry succeeded
    assert_eq!(resolver.form_title(), Some(FORM));
    assert_eq!(resolver.annotator().map(|a| a.as_str()), Some("janedoe"));
}

/// WHAT: An active session cannot choose a new form
/// WHY: Re-selection happens in a new interaction, never by mutation
#[test]
fn given_active_session_when_choosing_form_then_invalid_transition() {
    // Given: a resolver with an active session
    let mut resolver = awaiting_resolver();
    resolver.start_new().unwrap();

    // When: choosing a form again
    let result = resolver.choose_form("form_B", "Jane Doe");

    // Then: refused
    assert!(matches!(result, Err(CoreError::InvalidTransition { .. })));
}
