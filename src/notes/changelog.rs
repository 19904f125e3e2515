//! Prepend release sections to a changelog file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ReleaseError, Result};

/// Header for a newly created changelog.
pub const CHANGELOG_HEADER: &str = "# Changelog\n";

/// Insert `section` into the changelog at `path`, newest release first.
///
/// - Creates the file with [`CHANGELOG_HEADER`] if it doesn't exist
/// - Keeps any preamble above the first `## ` heading in place
/// - Replaces the file atomically via a temp file in the same directory
pub fn write_changelog(path: &Path, section: &str) -> Result<()> {
    let existing = if path.exists() {
        Some(std::fs::read_to_string(path).map_err(|e| {
            ReleaseError::changelog(format!("Failed to read {}: {}", path.display(), e))
        })?)
    } else {
        None
    };

    let content = match existing.as_deref() {
        Some(existing) => insert_section(existing, section),
        None => format!("{}\n{}", CHANGELOG_HEADER, section),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        ReleaseError::changelog(format!("Failed to create temp file in {}: {}", dir.display(), e))
    })?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ReleaseError::changelog(format!("Failed to write changelog: {}", e)))?;
    tmp.persist(path).map_err(|e| {
        ReleaseError::changelog(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    debug!("Wrote changelog {}", path.display());
    Ok(())
}

/// Place `section` before the first release heading of `existing`.
fn insert_section(existing: &str, section: &str) -> String {
    let insertion_point = find_insertion_point(existing);
    let (preamble, releases) = existing.split_at(insertion_point);

    let mut content = String::with_capacity(existing.len() + section.len() + 2);
    content.push_str(preamble);
    if !preamble.is_empty() && !preamble.ends_with("\n\n") {
        content.push_str(if preamble.ends_with('\n') { "\n" } else { "\n\n" });
    }
    content.push_str(section);
    if !releases.is_empty() {
        content.push('\n');
        content.push_str(releases);
    }
    content
}

/// Byte offset of the first line starting with `## `, or the end of the content.
fn find_insertion_point(content: &str) -> usize {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with("## ") {
            return offset;
        }
        offset += line.len();
    }
    content.len()
}
