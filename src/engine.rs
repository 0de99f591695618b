//! Manifest discovery and version rewriting

pub mod bump;
pub mod discovery;

pub use bump::{Rewrite, VersionBumper, VersionChange};
pub use discovery::{Discovery, ManifestWalker, SearchScope};
