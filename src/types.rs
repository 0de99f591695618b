#![forbid(unsafe_code)]

//! Core domain types for extbump
//!
//! This module defines the identifiers that drive a bump run and the set
//! that records which manifests have already been bumped.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Returns true if `id` is a usable library or theme identifier
///
/// Identifiers must be non-empty and contain only alphanumeric characters
/// (Unicode letters and digits included), hyphens, and underscores.
fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// A shared library whose consumers must be bumped
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRef(String);

impl LibraryRef {
    /// Creates a new LibraryRef, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        is_valid_identifier(&id).then_some(LibraryRef(id))
    }

    /// Extracts the library from a changed file path
    ///
    /// Looks for the first `lib/<identifier>/` run of segments. The `lib`
    /// segment has to be a whole path component, and the identifier has to
    /// be followed by another separator. Backslashes are treated as
    /// separators.
    pub fn from_changed_path(path: &str) -> Option<Self> {
        let normalized = path.replace('\\', "/");
        let segments: Vec<&str> = normalized.split('/').collect();

        segments
            .windows(3)
            .find(|w| w[0] == "lib" && is_valid_identifier(w[1]))
            .and_then(|w| LibraryRef::new(w[1]))
    }

    /// Token that a consumer manifest contains when it depends on this library
    pub fn search_token(&self) -> String {
        format!(":lib:{}", self.0)
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A multi-source theme whose consumers must be bumped
///
/// The theme name is the directory holding the theme's manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeRef(String);

impl ThemeRef {
    /// Creates a ThemeRef from a theme directory name
    pub fn new(name: impl Into<String>) -> Self {
        ThemeRef(name.into())
    }

    /// Derives the theme from the path of its manifest
    ///
    /// Returns None if the manifest has no parent directory name.
    pub fn from_manifest(path: &Path) -> Option<Self> {
        path.parent()
            .and_then(Path::file_name)
            .map(|name| ThemeRef(name.to_string_lossy().into_owned()))
    }

    /// Token that a consumer manifest contains when it uses this theme
    pub fn search_token(&self) -> String {
        format!("themePkg = '{}'", self.0)
    }

    /// Returns the theme name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A glob pattern for manifest matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

/// Manifests already bumped during the current run
///
/// Keeps insertion order for staging and refuses duplicates. Callers are
/// expected to insert absolute paths so one file maps to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpedSet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl BumpedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a path, returning false if it was already present
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Iterates over the recorded paths in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the set, returning the paths in insertion order
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.order
    }
}
