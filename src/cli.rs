//! CLI argument parsing and command dispatch

pub mod args;
pub mod bump;
pub mod common;

// Re-export types for convenient access
pub use args::Cli;
pub use bump::{BumpOutcome, run_bump, run_bump_versions};
pub use common::{EXIT_ERROR, EXIT_SUCCESS};
