// ABOUTME: Library root for stagehand - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cloud;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod release;
pub mod rollback;
pub mod stack;
pub mod types;
