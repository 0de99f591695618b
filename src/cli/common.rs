//! Common helper functions shared across CLI entry points

use crate::config::Config;
use crate::error::{BumpError, ConfigError};
use std::path::{Path, PathBuf};

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Resolve the repository root the run operates on
///
/// Manifest roots are relative to the process's working directory.
///
/// # Errors
///
/// Returns `BumpError::Io` if the working directory cannot be determined.
pub(crate) fn repository_root() -> Result<PathBuf, BumpError> {
    std::env::current_dir().map_err(|e| BumpError::io(".", e))
}

/// Load extbump.toml from the repository root, or defaults if absent
///
/// # Errors
///
/// Returns `ConfigError::Io` if extbump.toml exists but cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if it is invalid.
pub(crate) fn load_config(root: &Path) -> Result<Config, ConfigError> {
    Config::load_or_default(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "[layout\n").unwrap();
        assert!(matches!(
            load_config(temp_dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_repository_root_is_absolute() {
        let root = repository_root().unwrap();
        assert!(root.is_absolute());
    }
}
