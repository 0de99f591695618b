#![forbid(unsafe_code)]

//! Manifest discovery
//!
//! Enumerates consumer and theme manifests with the `ignore` walker and a
//! `globset` matcher, then reads the candidates in parallel on a rayon pool
//! to find the ones containing a search token.

use crate::config::LayoutConfig;
use crate::error::BumpError;
use crate::types::{BumpedSet, GlobPattern};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Which manifest shapes a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Consumer manifests and multi-source theme manifests
    All,
    /// Consumer manifests only
    SourceOnly,
}

/// One manifest shape: a root directory and the glob below the repository root
#[derive(Debug, Clone)]
struct ManifestShape {
    root: PathBuf,
    depth: usize,
    matcher: GlobMatcher,
}

impl ManifestShape {
    fn new(base: &Path, root: &str, pattern: GlobPattern) -> Result<Self, BumpError> {
        let glob = GlobBuilder::new(pattern.as_str())
            .literal_separator(true)
            .build()
            .map_err(|e| BumpError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;

        // The root itself counts as one path component of the pattern
        let depth = pattern.as_str().split('/').count() - 1;

        Ok(Self {
            root: base.join(root),
            depth,
            matcher: glob.compile_matcher(),
        })
    }

    /// Collects every file under the root matching the glob
    ///
    /// Symlinked directories and files are followed; paths are reported as
    /// reached through the link.
    fn collect(&self, base: &Path, out: &mut Vec<PathBuf>) -> Result<(), BumpError> {
        if !self.root.is_dir() {
            return Ok(());
        }

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(true)
            .max_depth(Some(self.depth))
            .build();

        for result in walker {
            let entry = result?;
            let path = entry.path();
            // Symlinked manifests count when their target is a file
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            if self.matcher.is_match(relative) {
                out.push(path.to_path_buf());
            }
        }
        Ok(())
    }
}

/// Enumerates manifests of both shapes below a repository root
#[derive(Debug, Clone)]
pub struct ManifestWalker {
    base: PathBuf,
    source: ManifestShape,
    multisrc: ManifestShape,
}

impl ManifestWalker {
    /// Creates a walker rooted at `base`
    ///
    /// `base` should be absolute so that discovered paths are absolute too.
    pub fn new(base: &Path, layout: &LayoutConfig) -> Result<Self, BumpError> {
        Ok(Self {
            base: base.to_path_buf(),
            source: ManifestShape::new(base, &layout.source_root, layout.source_glob())?,
            multisrc: ManifestShape::new(base, &layout.multisrc_root, layout.multisrc_glob())?,
        })
    }

    /// Lists candidate manifests for `scope`, sorted by path
    pub fn manifests(&self, scope: SearchScope) -> Result<Vec<PathBuf>, BumpError> {
        let mut paths = Vec::new();
        self.source.collect(&self.base, &mut paths)?;
        if scope == SearchScope::All {
            self.multisrc.collect(&self.base, &mut paths)?;
        }
        paths.sort();
        Ok(paths)
    }
}

/// Finds manifests containing a search token
#[derive(Debug, Clone)]
pub struct Discovery {
    walker: ManifestWalker,
    threads: Option<usize>,
}

impl Discovery {
    /// Creates a discovery over the repository at `base`
    ///
    /// # Arguments
    ///
    /// * `base` - Absolute repository root
    /// * `layout` - Manifest layout
    /// * `threads` - Read pool size, None for available parallelism
    pub fn new(
        base: &Path,
        layout: &LayoutConfig,
        threads: Option<usize>,
    ) -> Result<Self, BumpError> {
        Ok(Self {
            walker: ManifestWalker::new(base, layout)?,
            threads,
        })
    }

    /// Returns the manifests in `scope` whose text contains `token`
    ///
    /// Manifests already in `bumped` are never read. Reads run on a pool
    /// that is built for this call and finished before it returns. Any read
    /// failure aborts the whole search.
    pub fn find_matches(
        &self,
        token: &str,
        scope: SearchScope,
        bumped: &BumpedSet,
    ) -> Result<Vec<PathBuf>, BumpError> {
        let candidates: Vec<PathBuf> = self
            .walker
            .manifests(scope)?
            .into_iter()
            .filter(|path| !bumped.contains(path))
            .collect();

        if candidates.is_empty() {
            return Ok(candidates);
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        let results: Vec<(PathBuf, bool)> = pool.install(|| {
            candidates
                .into_par_iter()
                .map(|path| match fs::read_to_string(&path) {
                    Ok(text) => {
                        let matched = text.contains(token);
                        Ok((path, matched))
                    }
                    Err(e) => Err(BumpError::io(path, e)),
                })
                .collect::<Result<Vec<_>, BumpError>>()
        })?;

        Ok(results
            .into_iter()
            .filter_map(|(path, matched)| matched.then_some(path))
            .collect())
    }
}
