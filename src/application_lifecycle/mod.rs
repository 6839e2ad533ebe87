// Agent application lifecycle
//
// A fixed seven-state lifecycle with a static transition table. The table is
// the only authority on which state changes are legal; the workflow, the
// transition service and log replay all consult it.

pub mod error;
pub mod log;
pub mod schema;
pub mod service;
pub mod subject;
pub mod transitions;
pub mod types;
pub mod workflow;

pub use error::LifecycleError;
pub use log::{TransitionEvent, TransitionLog};
pub use schema::{LifecycleSchema, StateSchema};
pub use service::TransitionService;
pub use subject::{ApplicationRecord, InMemorySubjectStore, SubjectStore};
pub use transitions::{
    all_states, allowed_transitions, display_name, is_transition_allowed, is_valid_state,
    lifecycle_table, TransitionTable,
};
pub use types::{ApplicationState, UNKNOWN_DISPLAY_NAME};
pub use workflow::{ApplicationEvent, ApplicationWorkflow};
