use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{Classified, Commit, Section};

/// A single release-notes line derived from a classified commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub section: Section,
    pub scope: Option<String>,
    pub subject: String,
    pub short_hash: String,
}

impl NoteEntry {
    /// Build an entry for a commit, or `None` when its type is unclassified.
    pub fn from_commit(commit: &Commit) -> Option<Self> {
        match commit.classify() {
            Classified::Kept(kind) => Some(NoteEntry {
                section: kind.rule().section,
                scope: commit.scope.clone(),
                subject: commit.subject.clone(),
                short_hash: commit.short_hash(),
            }),
            Classified::Dropped => None,
        }
    }

    /// Absent scopes sort as the empty string, ahead of every named scope.
    fn sort_key(&self) -> (&str, &str, &str) {
        (
            self.scope.as_deref().unwrap_or_default(),
            self.subject.as_str(),
            self.short_hash.as_str(),
        )
    }

    fn cmp_for_notes(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// All entries listed under one section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteGroup {
    pub section: Section,
    pub entries: Vec<NoteEntry>,
}

/// Turn commits into release-notes groups.
///
/// Unclassified commits are dropped. Groups follow `section_order`, with any
/// unlisted section after all listed ones; entries within a group are sorted
/// by scope, then subject. The output does not depend on input order.
pub fn transform(commits: &[Commit], section_order: &[Section]) -> Vec<NoteGroup> {
    let mut grouped: BTreeMap<(usize, Section), Vec<NoteEntry>> = BTreeMap::new();

    for entry in commits.iter().filter_map(NoteEntry::from_commit) {
        grouped
            .entry((entry.section.rank(section_order), entry.section))
            .or_default()
            .push(entry);
    }

    grouped
        .into_iter()
        .map(|((_, section), mut entries)| {
            entries.sort_by(NoteEntry::cmp_for_notes);
            NoteGroup { section, entries }
        })
        .collect()
}
