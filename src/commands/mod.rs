// ABOUTME: Command module aggregator for the stagehand CLI.
// ABOUTME: Re-exports deploy, rollback, status, and cleanup command handlers.

mod cleanup;
mod connection;
mod deploy;
mod rollback;
mod status;

pub use cleanup::cleanup;
pub use deploy::deploy;
pub use rollback::rollback;
pub use status::status;
