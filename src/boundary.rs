use std::fmt;

/// Non-fatal conditions met while planning a release.
/// These are reported to the user but never stop the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest release tag
    NoNewCommits { latest_tag: String },
    /// Some commits carry no recognised gitmoji and were left out
    UnclassifiedCommits { ignored: usize, total: usize },
    /// No tag reachable from HEAD matches the tag format, including a repository with no tags
    NoMatchingTag { tag_format: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::UnclassifiedCommits { ignored, total } => {
                let noun = if *total == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "Ignored {} of {} {} without a recognised gitmoji",
                    ignored, total, noun
                )
            }
            BoundaryWarning::NoMatchingTag { tag_format } => {
                write!(
                    f,
                    "No earlier release tag matches '{}'; treating this as the first release",
                    tag_format
                )
            }
        }
    }
}

/// Why a run ended without a release. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoReleaseReason {
    /// The checked-out branch is not a configured release branch
    NotReleaseBranch { branch: String },
    /// Nothing was committed since the last release
    NoCommits,
    /// Commits exist but none of them warrants a version bump
    NoClassifiedCommits,
}

impl fmt::Display for NoReleaseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoReleaseReason::NotReleaseBranch { branch } => {
                write!(f, "Branch '{}' is not configured for releases", branch)
            }
            NoReleaseReason::NoCommits => f.write_str("No commits since the last release"),
            NoReleaseReason::NoClassifiedCommits => {
                f.write_str("No commit since the last release warrants a new version")
            }
        }
    }
}
