use crate::application_lifecycle::{allowed_transitions, display_name, is_valid_state};

use super::states::format_targets;

pub struct TransitionsCommand {
    pub state: String,
}

impl TransitionsCommand {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
        }
    }

    pub fn render(&self) -> String {
        if !is_valid_state(&self.state) {
            return format!("⚠️  Unknown state {:?}: no transitions\n", self.state);
        }
        format!(
            "{} ({}) → {}\n",
            self.state,
            display_name(&self.state),
            format_targets(allowed_transitions(&self.state))
        )
    }

    pub fn execute(&self) {
        print!("{}", self.render());
    }
}
