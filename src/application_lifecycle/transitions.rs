// Transition table and the string-token query API
//
// The table is built once on first use and shared read-only for the rest of
// the process. Every query here is pure and fails closed on unknown tokens.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::LazyLock;

use super::error::LifecycleError;
use super::types::{ApplicationState, UNKNOWN_DISPLAY_NAME};

use crate::application_lifecycle::types::ApplicationState::*;

/// Edges of the agent application lifecycle, in declaration order
pub const LIFECYCLE_EDGES: &[(ApplicationState, &[ApplicationState])] = &[
    (Draft, &[Submitted]),
    (Submitted, &[UnderReview]),
    (UnderReview, &[Approved, Rejected]),
    (Approved, &[Suspended, Revoked]),
    (Rejected, &[Draft]),
    (Suspended, &[Approved, Revoked]),
    (Revoked, &[Draft]),
];

static LIFECYCLE_TABLE: LazyLock<TransitionTable> =
    LazyLock::new(|| TransitionTable::from_edges(Draft, LIFECYCLE_EDGES));

/// Mapping from each state to the ordered states directly reachable from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    initial: ApplicationState,
    states: Vec<ApplicationState>,
    edges: HashMap<ApplicationState, Vec<ApplicationState>>,
}

impl TransitionTable {
    /// Build a table, rejecting repeated entries, repeated targets within an
    /// entry, and any state reachable from `initial` with no entry of its own.
    pub fn new(
        initial: ApplicationState,
        edges: &[(ApplicationState, &[ApplicationState])],
    ) -> Result<Self, LifecycleError> {
        check_duplicates(edges)?;
        let table = Self::from_edges(initial, edges);
        table.validate()?;
        Ok(table)
    }

    fn from_edges(
        initial: ApplicationState,
        edges: &[(ApplicationState, &[ApplicationState])],
    ) -> Self {
        let mut states = Vec::with_capacity(edges.len());
        let mut map = HashMap::with_capacity(edges.len());
        for (from, targets) in edges {
            if !map.contains_key(from) {
                states.push(*from);
            }
            map.insert(*from, targets.to_vec());
        }
        Self {
            initial,
            states,
            edges: map,
        }
    }

    /// Check that no state reachable from the initial state is orphaned
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if !self.edges.contains_key(&self.initial) {
            return Err(LifecycleError::OrphanedState {
                state: self.initial,
            });
        }
        for state in self.reachable_from(self.initial) {
            if !self.edges.contains_key(&state) {
                return Err(LifecycleError::OrphanedState { state });
            }
        }
        Ok(())
    }

    pub fn initial_state(&self) -> ApplicationState {
        self.initial
    }

    /// States that appear as keys, in the order they were declared
    pub fn states(&self) -> &[ApplicationState] {
        &self.states
    }

    pub fn contains(&self, state: ApplicationState) -> bool {
        self.edges.contains_key(&state)
    }

    /// Outgoing edges of `state`; empty when it has none
    pub fn allowed(&self, state: ApplicationState) -> &[ApplicationState] {
        self.edges.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn allows(&self, from: ApplicationState, to: ApplicationState) -> bool {
        self.allowed(from).contains(&to)
    }

    /// Breadth-first closure of the states reachable from `start`.
    ///
    /// `start` itself is only included when some cycle leads back to it.
    pub fn reachable_from(&self, start: ApplicationState) -> Vec<ApplicationState> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<ApplicationState> = self.allowed(start).iter().copied().collect();

        while let Some(state) = queue.pop_front() {
            if !seen.insert(state) {
                continue;
            }
            order.push(state);
            queue.extend(self.allowed(state).iter().copied());
        }
        order
    }
}

fn check_duplicates(
    edges: &[(ApplicationState, &[ApplicationState])],
) -> Result<(), LifecycleError> {
    let mut keys = HashSet::with_capacity(edges.len());
    for (from, targets) in edges {
        if !keys.insert(*from) {
            return Err(LifecycleError::DuplicateState { state: *from });
        }
        let mut seen = HashSet::with_capacity(targets.len());
        for to in targets.iter() {
            if !seen.insert(*to) {
                return Err(LifecycleError::DuplicateTransition {
                    from: *from,
                    to: *to,
                });
            }
        }
    }
    Ok(())
}

/// The lifecycle table shared by the whole process
pub fn lifecycle_table() -> &'static TransitionTable {
    &LIFECYCLE_TABLE
}

impl ApplicationState {
    pub fn allowed_transitions(&self) -> &'static [ApplicationState] {
        lifecycle_table().allowed(*self)
    }

    pub fn can_transition_to(&self, to: ApplicationState) -> bool {
        lifecycle_table().allows(*self, to)
    }
}

/// The complete state enumeration
pub fn all_states() -> &'static [ApplicationState] {
    &ApplicationState::ALL
}

pub fn is_valid_state(token: &str) -> bool {
    ApplicationState::parse(token).is_some()
}

/// Human-readable label for a token, `"Unknown"` outside the enumeration
pub fn display_name(token: &str) -> &'static str {
    ApplicationState::parse(token)
        .map(|state| state.display_name())
        .unwrap_or(UNKNOWN_DISPLAY_NAME)
}

/// Outgoing transitions for a token; empty for unknown tokens
pub fn allowed_transitions(token: &str) -> &'static [ApplicationState] {
    ApplicationState::parse(token)
        .map(|state| state.allowed_transitions())
        .unwrap_or(&[])
}

/// Sole authority consulted before a subject's state is mutated
pub fn is_transition_allowed(from: &str, to: &str) -> bool {
    match (ApplicationState::parse(from), ApplicationState::parse(to)) {
        (Some(from), Some(to)) => from.can_transition_to(to),
        _ => false,
    }
}
