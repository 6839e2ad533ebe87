// Error types for the application lifecycle

use thiserror::Error;

use super::types::ApplicationState;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Unknown application state: {0:?}")]
    UnknownState(String),

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: ApplicationState,
        to: ApplicationState,
    },

    #[error("State {state} is reachable but has no entry in the transition table")]
    OrphanedState { state: ApplicationState },

    #[error("State {state} has more than one entry in the transition table")]
    DuplicateState { state: ApplicationState },

    #[error("Transition from {from} to {to} is listed more than once")]
    DuplicateTransition {
        from: ApplicationState,
        to: ApplicationState,
    },

    #[error("Application {0} not found")]
    SubjectNotFound(String),

    #[error("Application {0} already exists")]
    SubjectExists(String),

    #[error("Application {id} was modified concurrently (expected state {expected})")]
    ConcurrentModification {
        id: String,
        expected: ApplicationState,
    },

    /// `position` is the 1-based entry number within the whole log
    #[error("Transition history for {subject_id} is broken at log entry {position}")]
    BrokenChain { subject_id: String, position: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
