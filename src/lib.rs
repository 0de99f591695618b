#![forbid(unsafe_code)]

//! extbump: mass-bump extension version codes
//!
//! Given the files changed in a multi-module extension repository, extbump
//! finds every extension manifest that depends on a changed shared library,
//! increments its version code, and commits and pushes the result.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;
pub mod vcs;

// Re-export error types for convenient access
pub use error::{BumpError, ConfigError};

// Re-export core domain types for convenient access
pub use types::{BumpedSet, GlobPattern, LibraryRef, ThemeRef};
