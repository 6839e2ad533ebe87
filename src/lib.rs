// TripLink agent-application lifecycle
// Exposes the lifecycle state machine and its call-site machinery

pub mod application_lifecycle;
pub mod cli;
pub mod config;
pub mod telemetry;

// Re-export key types for easy access
pub use application_lifecycle::{
    all_states, allowed_transitions, display_name, is_transition_allowed, is_valid_state,
    ApplicationEvent, ApplicationRecord, ApplicationState, ApplicationWorkflow,
    InMemorySubjectStore, LifecycleError, LifecycleSchema, SubjectStore, TransitionEvent,
    TransitionLog, TransitionService, TransitionTable,
};
pub use crate::config::{config, init_config, LifecycleConfig};
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
