use semver::Version;
use std::fmt;

use crate::error::{ReleaseError, Result};

/// Magnitude of a release, ordered `None < Patch < Minor < Major`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpLevel {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// Whether this level warrants cutting a release at all
    pub fn is_release(&self) -> bool {
        *self != BumpLevel::None
    }

    /// Bump version according to this level.
    ///
    /// Returns `Ok(None)` for [`BumpLevel::None`]. Lower components are reset
    /// and any pre-release or build metadata is dropped.
    ///
    /// # Errors
    /// Returns a version error when the bumped component would overflow.
    pub fn apply(&self, version: &Version) -> Result<Option<Version>> {
        let bumped = match self {
            BumpLevel::None => return Ok(None),
            BumpLevel::Major => increment(version.major, version)
                .map(|major| Version::new(major, 0, 0)),
            BumpLevel::Minor => increment(version.minor, version)
                .map(|minor| Version::new(version.major, minor, 0)),
            BumpLevel::Patch => increment(version.patch, version)
                .map(|patch| Version::new(version.major, version.minor, patch)),
        };
        bumped.map(Some)
    }
}

fn increment(component: u64, version: &Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!("Cannot bump {}: component overflows", version))
    })
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::None => "none",
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        };
        f.write_str(name)
    }
}

/// Version used for the very first release of a repository
pub fn initial_version() -> Version {
    Version::new(1, 0, 0)
}

/// Compute the version of the next release.
///
/// With no previous release any bump yields [`initial_version`].
pub fn next_version(previous: Option<&Version>, bump: BumpLevel) -> Result<Option<Version>> {
    if !bump.is_release() {
        return Ok(None);
    }
    match previous {
        Some(version) => bump.apply(version),
        None => Ok(Some(initial_version())),
    }
}
