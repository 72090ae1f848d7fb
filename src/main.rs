// ABOUTME: Entry point for the stagehand CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use stagehand::config::{Config, Overrides};
use stagehand::error::Result;
use stagehand::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli.command, Output::new(mode)).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;

    match command {
        Commands::Deploy { stage, build_dir } => {
            let overrides = Overrides {
                stage: stage.stage,
                build_dir,
            };
            let config = Config::load(&cwd, &overrides)?;
            commands::deploy(config, output).await
        }
        Commands::Rollback { stage } => {
            let config = Config::load(&cwd, &Overrides::for_stage(stage.stage))?;
            commands::rollback(config, output).await
        }
        Commands::Status { stage } => {
            let config = Config::load(&cwd, &Overrides::for_stage(stage.stage))?;
            commands::status(config, output).await
        }
        Commands::Cleanup { stage } => {
            let config = Config::load(&cwd, &Overrides::for_stage(stage.stage))?;
            commands::cleanup(config, output).await
        }
    }
}
