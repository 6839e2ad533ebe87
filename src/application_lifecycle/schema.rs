// Shared JSON schema of the lifecycle table
//
// Independent clients load this document instead of keeping their own copy
// of the table.

use serde::{Deserialize, Serialize};

use super::error::LifecycleError;
use super::transitions::{lifecycle_table, TransitionTable};
use super::types::ApplicationState;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSchema {
    pub version: u32,
    pub initial_state: ApplicationState,
    pub states: Vec<StateSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSchema {
    pub id: ApplicationState,
    pub display_name: String,
    pub transitions: Vec<ApplicationState>,
}

impl LifecycleSchema {
    pub fn from_table(table: &TransitionTable) -> Self {
        Self {
            version: SCHEMA_VERSION,
            initial_state: table.initial_state(),
            states: table
                .states()
                .iter()
                .map(|state| StateSchema {
                    id: *state,
                    display_name: state.display_name().to_string(),
                    transitions: table.allowed(*state).to_vec(),
                })
                .collect(),
        }
    }

    /// Schema of the process-wide lifecycle table
    pub fn current() -> Self {
        Self::from_table(lifecycle_table())
    }

    pub fn to_json_pretty(&self) -> Result<String, LifecycleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LifecycleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild and validate a table from this document
    pub fn to_table(&self) -> Result<TransitionTable, LifecycleError> {
        let edges: Vec<(ApplicationState, &[ApplicationState])> = self
            .states
            .iter()
            .map(|state| (state.id, state.transitions.as_slice()))
            .collect();
        TransitionTable::new(self.initial_state, &edges)
    }
}
