use crate::application_lifecycle::{all_states, ApplicationState};

pub struct StatesCommand;

impl StatesCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self) -> String {
        let mut out = String::from("📋 APPLICATION LIFECYCLE STATES\n");
        for state in all_states() {
            out.push_str(&format!(
                "  {:<13} {:<13} → {}\n",
                state.as_str(),
                state.display_name(),
                format_targets(state.allowed_transitions())
            ));
        }
        out
    }

    pub fn execute(&self) {
        print!("{}", self.render());
    }
}

impl Default for StatesCommand {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn format_targets(targets: &[ApplicationState]) -> String {
    if targets.is_empty() {
        return "(none)".to_string();
    }
    targets
        .iter()
        .map(ApplicationState::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
