use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::pattern::{ArtifactName, FileGlob};
use crate::config::ArtifactConfig;
use crate::error::{ReleaseError, Result};

/// The single file approved for publication in a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub path: PathBuf,
    pub version: Version,
}

/// One directory entry, captured for selection and diagnostics
#[derive(Debug, Clone)]
struct Listed {
    name: String,
    path: PathBuf,
    is_file: bool,
    len: u64,
}

/// Picks the built artifact out of the build output directory and stages it
/// under its canonical, version-stamped name.
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    output_dir: PathBuf,
    extension: String,
    exclude: FileGlob,
    name: ArtifactName,
}

impl ArtifactResolver {
    /// # Errors
    /// Returns a configuration error when either pattern is malformed.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        extension: &str,
        exclude_pattern: &str,
        name_pattern: &str,
    ) -> Result<Self> {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };

        Ok(ArtifactResolver {
            output_dir: output_dir.into(),
            extension,
            exclude: FileGlob::new(exclude_pattern)?,
            name: ArtifactName::new(name_pattern)?,
        })
    }

    /// Build a resolver from the `[artifact]` config section, relative to `root`.
    pub fn from_config(root: &Path, config: &ArtifactConfig) -> Result<Self> {
        ArtifactResolver::new(
            root.join(&config.output_dir),
            &config.extension,
            &config.exclude_pattern,
            &config.name_pattern,
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Glob the hosting collaborator uploads from
    pub fn publish_glob(&self) -> &str {
        self.name.glob().as_str()
    }

    /// Candidate artifacts in selection order.
    ///
    /// Files carrying the artifact extension and not matching the exclusion
    /// pattern qualify. Fresh build outputs come before files named like an
    /// earlier release; ties resolve lexicographically by path.
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let entries = self.scan()?;
        Ok(self.select_candidates(&entries))
    }

    /// Stage the release asset for `version`.
    ///
    /// The chosen candidate is copied to a temp file in the output directory,
    /// every file matching the publish glob is removed, and the temp file is
    /// renamed to the canonical name. Afterwards exactly one file matches the
    /// publish glob; this is checked before returning.
    ///
    /// # Errors
    /// - [`ReleaseError::NoArtifactFound`] when nothing qualifies; the directory is left untouched
    /// - [`ReleaseError::ArtifactIo`] when copying, removing or renaming fails
    /// - [`ReleaseError::ArtifactPostcondition`] when the final check fails
    pub fn resolve(&self, version: &Version) -> Result<ReleaseAsset> {
        let entries = self.scan()?;

        let chosen = match self.select_candidates(&entries).into_iter().next() {
            Some(path) => path,
            None => {
                return Err(ReleaseError::NoArtifactFound {
                    dir: self.output_dir.clone(),
                    listing: format_listing(&entries),
                })
            }
        };
        info!("Using built artifact: {}", chosen.display());

        let staged = self.stage_copy(&chosen)?;
        self.remove_stale(&entries)?;

        let canonical = self.output_dir.join(self.name.instantiate(version));
        staged
            .persist(&canonical)
            .map_err(|e| ReleaseError::artifact_io("rename", &canonical, e.error))?;

        self.verify(&canonical)?;
        info!("Staged release asset: {}", canonical.display());

        Ok(ReleaseAsset {
            path: canonical,
            version: version.clone(),
        })
    }

    /// An unreadable output directory means the build produced nothing usable.
    fn scan(&self) -> Result<Vec<Listed>> {
        self.list().map_err(|e| ReleaseError::NoArtifactFound {
            dir: self.output_dir.clone(),
            listing: format!("(cannot read directory: {})", e),
        })
    }

    fn list(&self) -> std::io::Result<Vec<Listed>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            entries.push(Listed {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_file: metadata.is_file(),
                len: metadata.len(),
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn select_candidates(&self, entries: &[Listed]) -> Vec<PathBuf> {
        let mut candidates: Vec<(bool, &Listed)> = entries
            .iter()
            .filter(|e| e.is_file && e.name.ends_with(&self.extension))
            .filter(|e| {
                let excluded = self.exclude.is_match(&e.name);
                if excluded {
                    debug!("Skipping excluded artifact: {}", e.name);
                }
                !excluded
            })
            .map(|e| (self.name.released_version(&e.name).is_some(), e))
            .collect();
        candidates.sort_by(|(a_stale, a), (b_stale, b)| {
            a_stale.cmp(b_stale).then_with(|| a.path.cmp(&b.path))
        });
        candidates.into_iter().map(|(_, e)| e.path.clone()).collect()
    }

    /// Copy `source` next to its final location, under a name the publish glob can't match.
    fn stage_copy(&self, source: &Path) -> Result<NamedTempFile> {
        let staged = tempfile::Builder::new()
            .prefix(".release-asset-")
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)
            .map_err(|e| ReleaseError::artifact_io("stage", &self.output_dir, e))?;
        fs::copy(source, staged.path())
            .map_err(|e| ReleaseError::artifact_io("copy", source, e))?;
        Ok(staged)
    }

    fn remove_stale(&self, entries: &[Listed]) -> Result<()> {
        for entry in entries
            .iter()
            .filter(|e| e.is_file && self.name.glob().is_match(&e.name))
        {
            debug!("Removing stale artifact: {}", entry.path.display());
            fs::remove_file(&entry.path)
                .map_err(|e| ReleaseError::artifact_io("remove", &entry.path, e))?;
        }
        Ok(())
    }

    fn verify(&self, canonical: &Path) -> Result<()> {
        let entries = self
            .list()
            .map_err(|e| ReleaseError::artifact_io("list", &self.output_dir, e))?;
        let found: Vec<String> = entries
            .into_iter()
            .filter(|e| self.name.glob().is_match(&e.name))
            .map(|e| e.name)
            .collect();

        let canonical_name = canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if matches!(found.as_slice(), [only] if *only == canonical_name) {
            return Ok(());
        }
        Err(ReleaseError::ArtifactPostcondition {
            dir: self.output_dir.clone(),
            glob: self.publish_glob().to_string(),
            found,
        })
    }
}

/// `ls`-style listing used in diagnostics when nothing qualifies
fn format_listing(entries: &[Listed]) -> String {
    if entries.is_empty() {
        return "(directory is empty)".to_string();
    }
    entries
        .iter()
        .map(|e| {
            if e.is_file {
                format!("  {:>10}  {}", e.len, e.name)
            } else {
                format!("  {:>10}  {}/", "-", e.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
