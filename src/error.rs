//! Error types for extbump
//!
//! Every failure in a bump run is fatal. The variants below exist so that the
//! final error message names the file or command that stopped the run.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML or has unknown fields
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level error type for extbump
#[derive(Debug, thiserror::Error)]
pub enum BumpError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading or rewriting a manifest failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A manifest glob could not be compiled
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    /// The version marker could not be turned into a regex
    #[error("Invalid version marker '{marker}': {source}")]
    InvalidMarker { marker: String, source: regex::Error },

    /// The read pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A version code is too large to increment
    #[error("Version code '{value}' in {} is out of range", path.display())]
    VersionOverflow { path: PathBuf, value: String },

    /// An external command could not be started
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully
    #[error("Command '{command}' failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },
}

impl BumpError {
    /// Wraps an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BumpError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = BumpError::io(
            "src/en/foo/build.gradle",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("src/en/foo/build.gradle"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_config_error_wraps() {
        let err: BumpError = ConfigError::Validation("empty marker".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: empty marker"
        );
    }

    #[test]
    fn test_overflow_message() {
        let err = BumpError::VersionOverflow {
            path: PathBuf::from("build.gradle"),
            value: "99999999999999999999999".to_string(),
        };
        assert!(err.to_string().contains("out of range"));
    }
}
