use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application_lifecycle::TransitionLog;

pub struct ReplayCommand {
    pub path: PathBuf,
}

impl ReplayCommand {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Replay every application in the log; returns false if any history is invalid
    pub async fn execute(&self) -> Result<bool> {
        let log = TransitionLog::load_from_file(&self.path)
            .await
            .with_context(|| format!("Failed to load transition log {}", self.path.display()))?;
        let (report, all_valid) = render_report(&log);
        print!("{report}");
        Ok(all_valid)
    }
}

pub(crate) fn render_report(log: &TransitionLog) -> (String, bool) {
    let results = log.replay_all();
    if results.is_empty() {
        return ("📋 Transition log is empty\n".to_string(), true);
    }

    let mut out = format!(
        "📋 Replayed {} events for {} applications\n",
        log.len(),
        results.len()
    );
    let mut all_valid = true;
    for (subject, result) in &results {
        match result {
            Ok(state) => out.push_str(&format!(
                "  ✅ {subject}: {} ({})\n",
                state,
                state.display_name()
            )),
            Err(e) => {
                all_valid = false;
                out.push_str(&format!("  ❌ {subject}: {e}\n"));
            }
        }
    }
    (out, all_valid)
}
