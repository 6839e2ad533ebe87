use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use triplink_lifecycle::cli::commands::{
    CheckCommand, ReplayCommand, SchemaCommand, StatesCommand, TransitionsCommand,
};
use triplink_lifecycle::cli::{Cli, Commands};
use triplink_lifecycle::{config, init_config, init_telemetry};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = config()?;
    init_telemetry(&config.observability)?;
    init_config()?;

    let success = match cli.command {
        Commands::States => {
            StatesCommand::new().execute();
            true
        }
        Commands::Transitions { state } => {
            TransitionsCommand::new(state).execute();
            true
        }
        Commands::Check { from, to } => CheckCommand::new(from, to).execute(),
        Commands::Schema { output } => {
            SchemaCommand::new(output).execute()?;
            true
        }
        Commands::Replay { path } => {
            let path = path.unwrap_or_else(|| config.log.path.clone());
            tokio::runtime::Runtime::new()?.block_on(async {
                ReplayCommand::new(path).execute().await
            })?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
