// Core types for the agent application lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::LifecycleError;

/// Label returned for any token outside the state enumeration
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// Lifecycle states of an agent application.
///
/// The wire token of each state is its SCREAMING_SNAKE_CASE name
/// (`DRAFT`, `UNDER_REVIEW`, ...), matched case-sensitively.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationState {
    /// Application started, not submitted
    #[default]
    Draft,
    /// Submitted for review
    Submitted,
    /// Admin actively reviewing
    UnderReview,
    /// Accepted; agent role granted
    Approved,
    /// Declined, may re-apply
    Rejected,
    /// Temporarily disabled after approval
    Suspended,
    /// Permanently disabled after approval, may re-apply
    Revoked,
}

impl ApplicationState {
    /// Every state, in declaration order
    pub const ALL: [ApplicationState; 7] = [
        ApplicationState::Draft,
        ApplicationState::Submitted,
        ApplicationState::UnderReview,
        ApplicationState::Approved,
        ApplicationState::Rejected,
        ApplicationState::Suspended,
        ApplicationState::Revoked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationState::Draft => "DRAFT",
            ApplicationState::Submitted => "SUBMITTED",
            ApplicationState::UnderReview => "UNDER_REVIEW",
            ApplicationState::Approved => "APPROVED",
            ApplicationState::Rejected => "REJECTED",
            ApplicationState::Suspended => "SUSPENDED",
            ApplicationState::Revoked => "REVOKED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ApplicationState::Draft => "Draft",
            ApplicationState::Submitted => "Submitted",
            ApplicationState::UnderReview => "Under Review",
            ApplicationState::Approved => "Approved",
            ApplicationState::Rejected => "Rejected",
            ApplicationState::Suspended => "Suspended",
            ApplicationState::Revoked => "Revoked",
        }
    }

    /// Parse a wire token, returning `None` for anything outside the enumeration
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == token)
    }

    /// Rejected and revoked applications may be re-opened as a new draft
    pub fn is_reappliable(&self) -> bool {
        matches!(self, ApplicationState::Rejected | ApplicationState::Revoked)
    }

    /// States in which the agent role has been granted at some point
    pub fn is_post_approval(&self) -> bool {
        matches!(
            self,
            ApplicationState::Approved | ApplicationState::Suspended | ApplicationState::Revoked
        )
    }

    /// Whether an agent in this state may act as an agent
    pub fn grants_agent_role(&self) -> bool {
        matches!(self, ApplicationState::Approved)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationState {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LifecycleError::UnknownState(s.to_string()))
    }
}
