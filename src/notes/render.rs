//! Markdown rendering of release notes.

use std::fmt::Write;

use chrono::NaiveDate;
use semver::Version;

use super::transform::{NoteEntry, NoteGroup};

/// Release notes for one version, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseNotes {
    pub version: Version,
    pub date: NaiveDate,
    pub groups: Vec<NoteGroup>,
}

impl ReleaseNotes {
    pub fn new(version: Version, date: NaiveDate, groups: Vec<NoteGroup>) -> Self {
        ReleaseNotes {
            version,
            date,
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Render as a markdown section headed `## <version> (<date>)`.
    pub fn render(&self) -> String {
        let mut out = format!("## {} ({})\n", self.version, self.date.format("%Y-%m-%d"));

        for group in &self.groups {
            let _ = write!(out, "\n### {}\n\n", group.section);
            for entry in &group.entries {
                out.push_str(&render_entry(entry));
                out.push('\n');
            }
        }

        out
    }
}

/// `* **scope:** subject (hash)`, omitting the parts that are empty
fn render_entry(entry: &NoteEntry) -> String {
    let mut line = String::from("* ");
    if let Some(scope) = entry.scope.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(line, "**{}:** ", scope);
    }
    line.push_str(&entry.subject);
    if !entry.short_hash.is_empty() {
        let _ = write!(line, " ({})", entry.short_hash);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Commit, Section};
    use crate::notes::transform;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_render_sections_and_entries() {
        let commits = vec![
            Commit::parse("🐛 fix crash", "bbbbbbbbbb"),
            Commit {
                scope: Some("api".to_string()),
                ..Commit::parse("✨ add widget", "aaaaaaaaaa")
            },
            Commit::parse("✨ (draft) parenthesised subject", "cccccccccc"),
        ];
        let notes = ReleaseNotes::new(
            Version::new(1, 1, 0),
            date(),
            transform(&commits, &Section::DEFAULT_ORDER),
        );

        assert_eq!(
            notes.render(),
            "## 1.1.0 (2024-03-09)\n\
             \n### Features\n\n\
             * (draft) parenthesised subject (ccccccc)\n\
             * **api:** add widget (aaaaaaa)\n\
             \n### Bug Fixes\n\n\
             * fix crash (bbbbbbb)\n"
        );
    }

    #[test]
    fn test_render_without_hash() {
        let notes = ReleaseNotes::new(
            Version::new(1, 0, 1),
            date(),
            transform(&[Commit::from_header("🔧 ci tweak")], &Section::DEFAULT_ORDER),
        );
        assert!(notes.render().contains("### Maintenance\n\n* ci tweak\n"));
        assert_eq!(notes.entry_count(), 1);
    }

    #[test]
    fn test_render_empty_notes_is_just_heading() {
        let notes = ReleaseNotes::new(Version::new(2, 0, 0), date(), Vec::new());
        assert!(notes.is_empty());
        assert_eq!(notes.render(), "## 2.0.0 (2024-03-09)\n");
    }
}
