use tracing::debug;

use crate::application_lifecycle::{display_name, is_transition_allowed};

pub struct CheckCommand {
    pub from: String,
    pub to: String,
}

impl CheckCommand {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        is_transition_allowed(&self.from, &self.to)
    }

    pub fn render(&self) -> String {
        let verdict = if self.is_allowed() {
            "✅ allowed"
        } else {
            "❌ not allowed"
        };
        format!(
            "{} ({}) → {} ({}): {}\n",
            self.from,
            display_name(&self.from),
            self.to,
            display_name(&self.to),
            verdict
        )
    }

    /// Print the verdict and return whether the transition is allowed
    pub fn execute(&self) -> bool {
        let allowed = self.is_allowed();
        debug!(from = %self.from, to = %self.to, allowed, "Checked transition");
        print!("{}", self.render());
        allowed
    }
}
