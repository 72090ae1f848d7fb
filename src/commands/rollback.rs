// ABOUTME: Rollback command implementation.
// ABOUTME: Runs the interactive selector on the terminal against AWS.

use super::connection::connect;
use stagehand::config::Config;
use stagehand::diagnostics::Diagnostics;
use stagehand::error::Result;
use stagehand::output::Output;
use stagehand::rollback::{Outcome, Prompter, TerminalPrompter, run_rollback};

/// Roll back the frontend or one function alias for the configured stage.
pub async fn rollback(config: Config, mut output: Output) -> Result<()> {
    // Refuse before building any client.
    config.ensure_versioned_stage()?;

    output.start_timer();
    let mut diag = Diagnostics::default();

    let mut prompter = TerminalPrompter::stdio();
    prompter.say(&format!("\nRollback ({})", config.stage))?;

    let cloud = connect(&config, &output).await;
    let result = run_rollback(&cloud, &config, &mut prompter, &output, &mut diag).await;
    diag.report(&output);
    let outcome = result?;

    match outcome {
        Outcome::RolledBack(plan) => output.success(&format!("Rolled back {plan}")),
        Outcome::AlreadyCurrent => {
            output.success("This version is already current. No changes made.")
        }
        Outcome::Cancelled => output.success("Cancelled."),
        Outcome::NothingToRollBack(reason) => output.success(&reason),
    }
    Ok(())
}
