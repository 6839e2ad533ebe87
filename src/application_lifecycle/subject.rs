// Subject store contract and an in-memory implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::LifecycleError;
use super::types::ApplicationState;

/// Persisted agent application record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub state: ApplicationState,
    /// Bumped on every successful state write
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            state: ApplicationState::Draft,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Storage owning the current state of each application.
///
/// `compare_and_set` must be atomic: it writes `new` only when the stored
/// state still equals `expected`.
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// Create a new application in DRAFT
    async fn create(&self, id: &str) -> Result<ApplicationRecord, LifecycleError>;

    async fn get(&self, id: &str) -> Result<Option<ApplicationRecord>, LifecycleError>;

    async fn compare_and_set(
        &self,
        id: &str,
        expected: ApplicationState,
        new: ApplicationState,
    ) -> Result<bool, LifecycleError>;

    async fn current_state(&self, id: &str) -> Result<ApplicationState, LifecycleError> {
        self.get(id)
            .await?
            .map(|record| record.state)
            .ok_or_else(|| LifecycleError::SubjectNotFound(id.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct InMemorySubjectStore {
    records: Mutex<HashMap<String, ApplicationRecord>>,
}

impl InMemorySubjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl SubjectStore for InMemorySubjectStore {
    async fn create(&self, id: &str) -> Result<ApplicationRecord, LifecycleError> {
        let mut records = self.records.lock().await;
        if records.contains_key(id) {
            return Err(LifecycleError::SubjectExists(id.to_string()));
        }
        let record = ApplicationRecord::new(id);
        records.insert(id.to_string(), record.clone());
        debug!(subject_id = %id, "Application created");
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<ApplicationRecord>, LifecycleError> {
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn compare_and_set(
        &self,
        id: &str,
        expected: ApplicationState,
        new: ApplicationState,
    ) -> Result<bool, LifecycleError> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| LifecycleError::SubjectNotFound(id.to_string()))?;

        if record.state != expected {
            debug!(
                subject_id = %id,
                expected = %expected,
                actual = %record.state,
                "Compare-and-set lost"
            );
            return Ok(false);
        }

        record.state = new;
        record.version += 1;
        record.updated_at = Utc::now();
        Ok(true)
    }
}
