//! Bump command implementation
//!
//! This module implements the whole bump run:
//! - Extracts the shared libraries named by changed file paths
//! - Finds the manifests that depend on each library
//! - Bumps consumer manifests directly and fans theme manifests out to the
//!   consumers using that theme
//! - Commits and pushes the bumped manifests when there are any

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::Config;
use crate::engine::{Discovery, SearchScope, VersionBumper};
use crate::error::BumpError;
use crate::output::Reporter;
use crate::types::{BumpedSet, LibraryRef, ThemeRef};
use crate::vcs::{self, CommandRunner, SystemRunner};
use std::path::{Path, PathBuf};

/// What a bump run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// Manifests bumped, in the order they were processed
    pub bumped: Vec<PathBuf>,
    /// Whether the commit and push were performed
    pub published: bool,
}

/// Run the bump command
///
/// This is the main entry point for the binary. It:
/// 1. Resolves the repository root from the working directory
/// 2. Loads extbump.toml (or defaults)
/// 3. Bumps and publishes through `git`
///
/// # Returns
///
/// Exit code:
/// - 0: Success, including runs where nothing matched
/// - 2: Error (config, I/O, or a failing git command)
pub fn run_bump(paths: &[String]) -> i32 {
    let (root, config) = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            Reporter::stdio(termcolor::ColorChoice::Auto).error(e);
            return EXIT_ERROR;
        }
    };
    let mut reporter = Reporter::stdio(termcolor::ColorChoice::from(config.output.color));

    match run_bump_inner(paths, &root, &config, &mut reporter) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            reporter.error(e);
            EXIT_ERROR
        }
    }
}

/// Resolves the repository root and its configuration
fn load_settings() -> Result<(PathBuf, Config), BumpError> {
    let root = super::common::repository_root()?;
    let config = super::common::load_config(&root)?;
    Ok((root, config))
}

/// Internal implementation of bump command
fn run_bump_inner(
    paths: &[String],
    root: &Path,
    config: &Config,
    reporter: &mut Reporter,
) -> Result<BumpOutcome, BumpError> {
    let mut runner = SystemRunner::in_dir(root);
    run_bump_versions(paths, root, config, &mut runner, reporter)
}

/// Bump every manifest affected by the changed `paths`
///
/// # Arguments
///
/// * `paths` - Changed file paths; paths without a `lib/<name>/` segment are ignored
/// * `root` - Absolute repository root the manifest layout is relative to
/// * `config` - Layout, scan, and git settings
/// * `runner` - Executes the git commands
/// * `reporter` - Receives progress output
///
/// # Errors
///
/// Any I/O or git failure stops the run immediately. Manifests rewritten
/// before the failure stay rewritten.
pub fn run_bump_versions(
    paths: &[String],
    root: &Path,
    config: &Config,
    runner: &mut dyn CommandRunner,
    reporter: &mut Reporter,
) -> Result<BumpOutcome, BumpError> {
    let discovery = Discovery::new(root, &config.layout, config.scan.threads)?;
    let bumper = VersionBumper::new(&config.layout.version_marker)?;
    let mut bumped = BumpedSet::new();

    for path in paths {
        let Some(library) = LibraryRef::from_changed_path(path) else {
            continue;
        };
        reporter.library(&library);

        let matches = discovery.find_matches(&library.search_token(), SearchScope::All, &bumped)?;
        for manifest in matches {
            if config.layout.is_theme_manifest(&manifest) {
                if let Some(theme) = ThemeRef::from_manifest(&manifest) {
                    bump_theme(&theme, &discovery, &bumper, &mut bumped, reporter)?;
                }
            } else {
                bumper.bump_file(&manifest, &mut bumped, reporter)?;
            }
        }
    }

    let published = if bumped.is_empty() {
        reporter.nothing_to_commit();
        false
    } else {
        reporter.publishing(bumped.len());
        vcs::publish(runner, &bumped, &config.git)?;
        true
    };

    Ok(BumpOutcome {
        bumped: bumped.into_paths(),
        published,
    })
}

/// Bump every consumer manifest using `theme`
///
/// Theme manifests themselves are not searched.
fn bump_theme(
    theme: &ThemeRef,
    discovery: &Discovery,
    bumper: &VersionBumper,
    bumped: &mut BumpedSet,
    reporter: &mut Reporter,
) -> Result<(), BumpError> {
    reporter.theme(theme);
    let consumers = discovery.find_matches(&theme.search_token(), SearchScope::SourceOnly, bumped)?;
    for manifest in consumers {
        bumper.bump_file(&manifest, bumped, reporter)?;
    }
    Ok(())
}
