#![forbid(unsafe_code)]

//! Version code rewriting
//!
//! A manifest carries its version as `<marker> <digits>`, for example
//! `extVersionCode = 12`. Bumping increments every occurrence by one and
//! rewrites the whole file.

use crate::error::BumpError;
use crate::output::Reporter;
use crate::types::BumpedSet;
use regex::Regex;
use std::fs;
use std::path::Path;

/// One version transition applied to a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionChange {
    pub old: u64,
    pub new: u64,
}

/// Result of rewriting manifest text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Full rewritten text
    pub text: String,
    /// Transitions in order of appearance
    pub changes: Vec<VersionChange>,
}

/// Digits that could not be incremented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overflow(pub String);

/// Increments version markers in manifests
#[derive(Debug, Clone)]
pub struct VersionBumper {
    pattern: Regex,
}

impl VersionBumper {
    /// Compiles the pattern for `marker`
    ///
    /// The marker is matched literally and must be followed by one space and
    /// ASCII digits.
    pub fn new(marker: &str) -> Result<Self, BumpError> {
        let pattern = format!(r"{} ([0-9]+)", regex::escape(marker));
        let pattern = Regex::new(&pattern).map_err(|e| BumpError::InvalidMarker {
            marker: marker.to_string(),
            source: e,
        })?;
        Ok(Self { pattern })
    }

    /// Increments every version occurrence in `text`
    ///
    /// Text outside the digits is copied unchanged. Text without a marker
    /// comes back identical with no changes.
    pub fn replace_version(&self, text: &str) -> Result<Rewrite, Overflow> {
        let mut out = String::with_capacity(text.len() + 4);
        let mut changes = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            let Some(digits) = caps.get(1) else {
                continue;
            };
            let old: u64 = digits
                .as_str()
                .parse()
                .map_err(|_| Overflow(digits.as_str().to_string()))?;
            let new = old
                .checked_add(1)
                .ok_or_else(|| Overflow(digits.as_str().to_string()))?;

            out.push_str(&text[last..digits.start()]);
            out.push_str(&new.to_string());
            last = digits.end();
            changes.push(VersionChange { old, new });
        }
        out.push_str(&text[last..]);

        Ok(Rewrite { text: out, changes })
    }

    /// Bumps one manifest on disk and records it in `bumped`
    ///
    /// Returns None without touching the file if it was already bumped in
    /// this run. A manifest without a marker is still rewritten and recorded.
    /// `fs::write` truncates, so no bytes of the old content survive.
    pub fn bump_file(
        &self,
        path: &Path,
        bumped: &mut BumpedSet,
        reporter: &mut Reporter,
    ) -> Result<Option<Vec<VersionChange>>, BumpError> {
        if bumped.contains(path) {
            return Ok(None);
        }

        let text = fs::read_to_string(path).map_err(|e| BumpError::io(path, e))?;
        let rewrite = self
            .replace_version(&text)
            .map_err(|Overflow(value)| BumpError::VersionOverflow {
                path: path.to_path_buf(),
                value,
            })?;
        fs::write(path, &rewrite.text).map_err(|e| BumpError::io(path, e))?;

        bumped.insert(path);
        reporter.bumped(path, &rewrite.changes);
        Ok(Some(rewrite.changes))
    }
}
