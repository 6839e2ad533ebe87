// Event-driven workflow for a single application
//
// Each named event maps to a target state. The workflow only moves when the
// lifecycle table allows the edge; everything else is ignored and counted.

use serde::{Deserialize, Serialize};
use statig::prelude::*;
use tracing::{info, warn};

use super::types::ApplicationState;

/// Actions a controlling authority can take on an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationEvent {
    Submit,
    BeginReview,
    Approve,
    Reject,
    Suspend,
    Reinstate,
    Revoke,
    Reapply,
}

impl ApplicationEvent {
    pub fn target_state(&self) -> ApplicationState {
        match self {
            ApplicationEvent::Submit => ApplicationState::Submitted,
            ApplicationEvent::BeginReview => ApplicationState::UnderReview,
            ApplicationEvent::Approve | ApplicationEvent::Reinstate => ApplicationState::Approved,
            ApplicationEvent::Reject => ApplicationState::Rejected,
            ApplicationEvent::Suspend => ApplicationState::Suspended,
            ApplicationEvent::Revoke => ApplicationState::Revoked,
            ApplicationEvent::Reapply => ApplicationState::Draft,
        }
    }
}

#[derive(Debug)]
pub struct ApplicationWorkflow {
    pub subject_id: String,
    current: ApplicationState,
    accepted_events: u32,
    rejected_events: u32,
    visited: Vec<ApplicationState>,
}

impl Default for ApplicationWorkflow {
    fn default() -> Self {
        Self::new("")
    }
}

impl ApplicationWorkflow {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            current: ApplicationState::Draft,
            accepted_events: 0,
            rejected_events: 0,
            visited: vec![ApplicationState::Draft],
        }
    }

    pub fn current_state(&self) -> ApplicationState {
        self.current
    }

    pub fn accepted_events(&self) -> u32 {
        self.accepted_events
    }

    pub fn rejected_events(&self) -> u32 {
        self.rejected_events
    }

    /// Every state entered so far, starting with DRAFT
    pub fn visited(&self) -> &[ApplicationState] {
        &self.visited
    }

    fn advance(&mut self, from: ApplicationState, event: &ApplicationEvent) -> Outcome<State> {
        let to = event.target_state();
        if !from.can_transition_to(to) {
            self.rejected_events += 1;
            warn!(
                subject_id = %self.subject_id,
                from = %from,
                to = %to,
                event = ?event,
                "Ignoring event: transition not allowed"
            );
            return Handled;
        }

        self.accepted_events += 1;
        self.current = to;
        self.visited.push(to);
        info!(
            subject_id = %self.subject_id,
            from = %from,
            to = %to,
            event = ?event,
            "Application transitioned"
        );
        Transition(state_for(to))
    }
}

#[state_machine(initial = "State::draft()")]
impl ApplicationWorkflow {
    #[state]
    fn draft(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Draft, event)
    }

    #[state]
    fn submitted(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Submitted, event)
    }

    #[state]
    fn under_review(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::UnderReview, event)
    }

    #[state]
    fn approved(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Approved, event)
    }

    #[state]
    fn rejected(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Rejected, event)
    }

    #[state]
    fn suspended(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Suspended, event)
    }

    #[state]
    fn revoked(&mut self, event: &ApplicationEvent) -> Outcome<State> {
        self.advance(ApplicationState::Revoked, event)
    }
}

fn state_for(state: ApplicationState) -> State {
    match state {
        ApplicationState::Draft => State::draft(),
        ApplicationState::Submitted => State::submitted(),
        ApplicationState::UnderReview => State::under_review(),
        ApplicationState::Approved => State::approved(),
        ApplicationState::Rejected => State::rejected(),
        ApplicationState::Suspended => State::suspended(),
        ApplicationState::Revoked => State::revoked(),
    }
}

#[cfg(test)]
fn application_state(state: &State) -> ApplicationState {
    match state {
        State::Draft { .. } => ApplicationState::Draft,
        State::Submitted { .. } => ApplicationState::Submitted,
        State::UnderReview { .. } => ApplicationState::UnderReview,
        State::Approved { .. } => ApplicationState::Approved,
        State::Rejected { .. } => ApplicationState::Rejected,
        State::Suspended { .. } => ApplicationState::Suspended,
        State::Revoked { .. } => ApplicationState::Revoked,
    }
}
