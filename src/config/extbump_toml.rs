//! Parsing and validation for extbump.toml configuration files
//!
//! The file is optional. Every field has a default that matches the
//! extension repository layout, so a missing file and an empty file behave
//! the same.

use crate::error::ConfigError;
use crate::types::GlobPattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "extbump.toml";

/// Main configuration struct for extbump.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where manifests live and what marks their version
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Manifest scanning settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Commit identity and message
    #[serde(default)]
    pub git: GitConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `extbump.toml` from `dir`, falling back to defaults when absent
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        for (field, value) in [
            ("layout.source_root", &layout.source_root),
            ("layout.source_manifest", &layout.source_manifest),
            ("layout.multisrc_root", &layout.multisrc_root),
            ("layout.multisrc_manifest", &layout.multisrc_manifest),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{} must not be empty", field)));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "{} must be a single path component, got '{}'",
                    field, value
                )));
            }
        }

        if layout.version_marker.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout.version_marker must not be empty".to_string(),
            ));
        }

        // Validate glob patterns by attempting to compile them with globset
        for pattern in [layout.source_glob(), layout.multisrc_glob()] {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid manifest glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        if self.scan.threads == Some(0) {
            return Err(ConfigError::Validation(
                "scan.threads must be at least 1".to_string(),
            ));
        }

        let git = &self.git;
        for (field, value) in [
            ("git.user_email", &git.user_email),
            ("git.user_name", &git.user_name),
            ("git.commit_message", &git.commit_message),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }
}

/// Repository layout section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Directory holding `<group>/<extension>/<source_manifest>`
    pub source_root: String,

    /// File name of a consumer manifest
    pub source_manifest: String,

    /// Directory holding `<theme>/<multisrc_manifest>`
    pub multisrc_root: String,

    /// File name of a multi-source theme manifest
    pub multisrc_manifest: String,

    /// Text that precedes the version integer, e.g. `VersionCode =`
    pub version_marker: String,
}

impl LayoutConfig {
    /// Glob for consumer manifests, relative to the repository root
    pub fn source_glob(&self) -> GlobPattern {
        GlobPattern::new(format!("{}/*/*/{}", self.source_root, self.source_manifest))
    }

    /// Glob for multi-source theme manifests, relative to the repository root
    pub fn multisrc_glob(&self) -> GlobPattern {
        GlobPattern::new(format!("{}/*/{}", self.multisrc_root, self.multisrc_manifest))
    }

    /// Returns true if `manifest` is a theme manifest under the multi-source root
    ///
    /// The grandparent directory must carry the multi-source root's name.
    pub fn is_theme_manifest(&self, manifest: &Path) -> bool {
        manifest
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .is_some_and(|name| name == self.multisrc_root.as_str())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_root: "src".to_string(),
            source_manifest: "build.gradle".to_string(),
            multisrc_root: "lib-multisrc".to_string(),
            multisrc_manifest: "build.gradle.kts".to_string(),
            version_marker: "VersionCode =".to_string(),
        }
    }
}

/// Manifest scanning section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker threads used to read manifests (defaults to available parallelism)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

/// Git identity and commit section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Local `user.email` set before committing
    pub user_email: String,

    /// Local `user.name` set before committing
    pub user_name: String,

    /// Commit message for the mass bump
    pub commit_message: String,

    /// Whether to sign the commit with `-S`
    pub sign: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            user_email: "github-actions[bot]@users.noreply.github.com".to_string(),
            user_name: "github-actions[bot]".to_string(),
            commit_message: "[skip ci] chore: Mass-bump on extensions".to_string(),
            sign: true,
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Color output setting
    pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorOption> for termcolor::ColorChoice {
    fn from(option: ColorOption) -> Self {
        match option {
            ColorOption::Auto => termcolor::ColorChoice::Auto,
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::Never => termcolor::ColorChoice::Never,
        }
    }
}
