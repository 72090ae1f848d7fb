// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "Versioned release and rollback for static frontends and serverless functions")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct StageArg {
    /// Deployment stage (overrides STAGE and the config file)
    #[arg(short, long)]
    pub stage: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish the frontend build as a new version and make it live
    ///
    /// Runs against one stage at a time. There is no cross-run locking:
    /// do not start two deploys or rollbacks for the same stage at once.
    Deploy {
        #[command(flatten)]
        stage: StageArg,

        /// Frontend build output directory
        #[arg(short, long)]
        build_dir: Option<PathBuf>,
    },

    /// Interactively roll back the frontend or a function alias
    ///
    /// Not available for the dev stage. There is no cross-run locking:
    /// do not start two deploys or rollbacks for the same stage at once.
    Rollback {
        #[command(flatten)]
        stage: StageArg,
    },

    /// Show the current frontend version and the versions available
    Status {
        #[command(flatten)]
        stage: StageArg,
    },

    /// Delete frontend versions beyond the retention count
    Cleanup {
        #[command(flatten)]
        stage: StageArg,
    },
}
