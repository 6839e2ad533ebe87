// Append-only transition history with replay

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use super::error::LifecycleError;
use super::types::ApplicationState;

/// One accepted state change of one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub subject_id: String,
    pub from: ApplicationState,
    pub to: ApplicationState,
    pub actor: String,
    pub occurred_at: DateTime<Utc>,
    pub correlation_id: String,
}

impl TransitionEvent {
    pub fn new(
        subject_id: impl Into<String>,
        from: ApplicationState,
        to: ApplicationState,
        actor: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            from,
            to,
            actor: actor.into(),
            occurred_at: Utc::now(),
            correlation_id: correlation_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionLog {
    events: Vec<TransitionEvent>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: TransitionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TransitionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for<'a>(
        &'a self,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a TransitionEvent> + 'a {
        self.events
            .iter()
            .filter(move |event| event.subject_id == subject_id)
    }

    /// Subject ids in first-seen order, without duplicates
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = Vec::new();
        for event in &self.events {
            if !subjects.contains(&event.subject_id.as_str()) {
                subjects.push(&event.subject_id);
            }
        }
        subjects
    }

    /// Current state taken from the last entry, DRAFT when nothing was logged
    pub fn current_state(&self, subject_id: &str) -> ApplicationState {
        self.events_for(subject_id)
            .last()
            .map(|event| event.to)
            .unwrap_or_default()
    }

    /// Re-validate a subject's whole history starting from DRAFT
    pub fn replay(&self, subject_id: &str) -> Result<ApplicationState, LifecycleError> {
        let mut current = ApplicationState::Draft;
        let entries = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| event.subject_id == subject_id);
        for (index, event) in entries {
            if event.from != current {
                return Err(LifecycleError::BrokenChain {
                    subject_id: subject_id.to_string(),
                    position: index + 1,
                });
            }
            if !event.from.can_transition_to(event.to) {
                return Err(LifecycleError::InvalidTransition {
                    from: event.from,
                    to: event.to,
                });
            }
            current = event.to;
        }
        debug!(subject_id = %subject_id, state = %current, "Replayed transition history");
        Ok(current)
    }

    pub fn replay_all(&self) -> BTreeMap<String, Result<ApplicationState, LifecycleError>> {
        self.subjects()
            .into_iter()
            .map(|subject| (subject.to_string(), self.replay(subject)))
            .collect()
    }

    /// Write the log as JSON Lines
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LifecycleError> {
        let mut content = String::new();
        for event in &self.events {
            content.push_str(&serde_json::to_string(event)?);
            content.push('\n');
        }
        fs::write(path.as_ref(), content).await?;
        info!(
            path = %path.as_ref().display(),
            events = self.events.len(),
            "Transition log saved"
        );
        Ok(())
    }

    /// Read a JSON Lines log; blank lines are skipped
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LifecycleError> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let mut log = Self::new();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            log.append(serde_json::from_str(line)?);
        }
        info!(
            path = %path.as_ref().display(),
            events = log.len(),
            "Transition log loaded"
        );
        Ok(log)
    }
}

impl FromIterator<TransitionEvent> for TransitionLog {
    fn from_iter<I: IntoIterator<Item = TransitionEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_lifecycle::types::ApplicationState::*;

    fn event(subject: &str, from: ApplicationState, to: ApplicationState) -> TransitionEvent {
        TransitionEvent::new(subject, from, to, "admin-7", "corr-1")
    }

    #[test]
    fn test_current_state_is_last_entry() {
        let log: TransitionLog = [
            event("a", Draft, Submitted),
            event("b", Draft, Submitted),
            event("a", Submitted, UnderReview),
        ]
        .into_iter()
        .collect();

        assert_eq!(log.current_state("a"), UnderReview);
        assert_eq!(log.current_state("b"), Submitted);
        assert_eq!(log.current_state("never-seen"), Draft);
        assert_eq!(log.subjects(), vec!["a", "b"]);
    }

    #[test]
    fn test_replay_accepts_valid_history() {
        let log: TransitionLog = [
            event("a", Draft, Submitted),
            event("a", Submitted, UnderReview),
            event("a", UnderReview, Rejected),
            event("a", Rejected, Draft),
        ]
        .into_iter()
        .collect();

        assert_eq!(log.replay("a").unwrap(), Draft);
    }

    #[test]
    fn test_replay_rejects_forbidden_edge() {
        let log: TransitionLog = [event("a", Draft, Approved)].into_iter().collect();
        assert!(matches!(
            log.replay("a"),
            Err(LifecycleError::InvalidTransition { from: Draft, to: Approved })
        ));
    }

    #[test]
    fn test_replay_rejects_broken_chain() {
        let log: TransitionLog = [
            event("a", Draft, Submitted),
            event("a", UnderReview, Approved),
        ]
        .into_iter()
        .collect();

        assert!(matches!(
            log.replay("a"),
            Err(LifecycleError::BrokenChain { position: 2, .. })
        ));
    }

    #[test]
    fn test_broken_chain_reports_position_in_whole_log() {
        let log: TransitionLog = [
            event("a", Draft, Submitted),
            event("b", Draft, Submitted),
            event("b", Submitted, UnderReview),
            event("a", UnderReview, Approved),
        ]
        .into_iter()
        .collect();

        let err = log.replay("a").unwrap_err();
        assert!(matches!(
            &err,
            LifecycleError::BrokenChain { subject_id, position: 4 } if subject_id == "a"
        ));
        assert_eq!(
            err.to_string(),
            "Transition history for a is broken at log entry 4"
        );
    }

    #[test]
    fn test_replay_all_reports_per_subject() {
        let log: TransitionLog = [
            event("good", Draft, Submitted),
            event("bad", Submitted, UnderReview),
        ]
        .into_iter()
        .collect();

        let results = log.replay_all();
        assert_eq!(results.len(), 2);
        assert!(matches!(results["good"], Ok(Submitted)));
        assert!(results["bad"].is_err());
    }
}
