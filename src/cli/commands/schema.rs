use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::application_lifecycle::LifecycleSchema;

pub struct SchemaCommand {
    pub output: Option<PathBuf>,
}

impl SchemaCommand {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn execute(&self) -> Result<()> {
        let json = LifecycleSchema::current().to_json_pretty()?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write schema to {}", path.display()))?;
                info!(path = %path.display(), "Lifecycle schema written");
                println!("✅ Schema written to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
