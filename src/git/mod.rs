//! Git operations abstraction layer
//!
//! The release pipeline only needs a handful of read operations plus tag
//! creation. They sit behind the [Repository] trait so the pipeline can run
//! against a real repository ([repository::Git2Repository]) or an in-memory
//! one in tests ([mock::MockRepository]).

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, TagFormat};
use crate::error::Result;
use semver::Version;

/// Commit information read from history
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The full commit message
    pub message: String,
}

impl CommitInfo {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Parse into the form the classifier and notes transformer consume
    pub fn to_commit(&self) -> Commit {
        Commit::parse(&self.message, self.hash.as_str())
    }
}

/// A tag recognised as an earlier release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub version: Version,
}

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the matching
/// [crate::error::ReleaseError] variants.
pub trait Repository {
    /// Name of the branch HEAD points at
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "main")
    /// * `Err` - If HEAD is detached or unreadable
    fn current_branch(&self) -> Result<String>;

    /// Latest release tag reachable from HEAD
    ///
    /// Only tags that `format` recognises are considered; among those
    /// reachable from HEAD the highest version wins.
    ///
    /// # Returns
    /// * `Ok(Some(ReleaseTag))` - The previous release
    /// * `Ok(None)` - If nothing has been released yet
    fn latest_tag(&self, format: &TagFormat) -> Result<Option<ReleaseTag>>;

    /// Commits reachable from HEAD but not from `tag`, oldest first
    ///
    /// With no tag every commit reachable from HEAD is returned.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Create a lightweight tag at HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists or HEAD can't be resolved
    fn create_tag(&self, name: &str) -> Result<()>;
}
