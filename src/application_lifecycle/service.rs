// Atomic transition service
//
// Reads the subject's state, checks the lifecycle table, writes through the
// store's compare-and-set and records the event, as a single operation.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn, Instrument};

use super::error::LifecycleError;
use super::log::{TransitionEvent, TransitionLog};
use super::subject::{ApplicationRecord, SubjectStore};
use super::types::ApplicationState;
use super::workflow::ApplicationEvent;
use crate::telemetry::{create_transition_span, generate_correlation_id};

pub struct TransitionService<S: SubjectStore> {
    store: Arc<S>,
    log: Arc<Mutex<TransitionLog>>,
}

impl<S: SubjectStore> TransitionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_log(store, Arc::new(Mutex::new(TransitionLog::new())))
    }

    pub fn with_log(store: Arc<S>, log: Arc<Mutex<TransitionLog>>) -> Self {
        Self { store, log }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Open a new application in DRAFT
    pub async fn open(&self, id: &str) -> Result<ApplicationRecord, LifecycleError> {
        let record = self.store.create(id).await?;
        info!(subject_id = %id, "Application opened");
        Ok(record)
    }

    /// Apply a transition given as an untrusted state token
    pub async fn transition(
        &self,
        id: &str,
        to: &str,
        actor: &str,
    ) -> Result<TransitionEvent, LifecycleError> {
        let to: ApplicationState = to.parse()?;
        self.apply(id, to, actor).await
    }

    pub async fn apply_event(
        &self,
        id: &str,
        event: ApplicationEvent,
        actor: &str,
    ) -> Result<TransitionEvent, LifecycleError> {
        self.apply(id, event.target_state(), actor).await
    }

    pub async fn apply(
        &self,
        id: &str,
        to: ApplicationState,
        actor: &str,
    ) -> Result<TransitionEvent, LifecycleError> {
        let correlation_id = generate_correlation_id();
        let span = create_transition_span(id, to.as_str(), actor, &correlation_id);
        self.apply_inner(id, to, actor, correlation_id)
            .instrument(span)
            .await
    }

    async fn apply_inner(
        &self,
        id: &str,
        to: ApplicationState,
        actor: &str,
        correlation_id: String,
    ) -> Result<TransitionEvent, LifecycleError> {
        let from = self.store.current_state(id).await?;

        if !from.can_transition_to(to) {
            warn!(subject_id = %id, from = %from, to = %to, actor = %actor, "Transition rejected");
            return Err(LifecycleError::InvalidTransition { from, to });
        }

        // Held across the write so log order matches store order
        let mut log = self.log.lock().await;

        if !self.store.compare_and_set(id, from, to).await? {
            warn!(subject_id = %id, expected = %from, to = %to, "Transition lost a concurrent update");
            return Err(LifecycleError::ConcurrentModification {
                id: id.to_string(),
                expected: from,
            });
        }

        let event = TransitionEvent::new(id, from, to, actor, correlation_id);
        log.append(event.clone());
        info!(
            subject_id = %id,
            from = %from,
            to = %to,
            actor = %actor,
            correlation_id = %event.correlation_id,
            "Transition applied"
        );
        Ok(event)
    }

    /// Copy of the transition history recorded so far
    pub async fn log_snapshot(&self) -> TransitionLog {
        self.log.lock().await.clone()
    }
}
