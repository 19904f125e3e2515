use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for gitmoji-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("No built artifact found in {}. Did the build step run?\n{listing}", dir.display())]
    NoArtifactFound { dir: PathBuf, listing: String },

    #[error("Artifact {op} failed for {}: {source}", path.display())]
    ArtifactIo {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact postcondition violated in {}: expected exactly one file matching '{glob}', found {found:?}", dir.display())]
    ArtifactPostcondition {
        dir: PathBuf,
        glob: String,
        found: Vec<String>,
    },

    #[error("Changelog error: {0}")]
    Changelog(String),
}

/// Convenience type alias for Results in gitmoji-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        ReleaseError::Branch(msg.into())
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseError::Changelog(msg.into())
    }

    /// Wrap a filesystem failure on an artifact path
    pub fn artifact_io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::ArtifactIo {
            op,
            path: path.into(),
            source,
        }
    }
}
