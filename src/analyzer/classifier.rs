use crate::domain::{BumpLevel, Classified, Commit, CommitType};
use tracing::debug;

/// Decide the release bump for a set of commits.
///
/// The result is the highest bump among classified commits. Unclassified
/// commits contribute [`BumpLevel::None`], so an empty or fully unclassified
/// list means no release.
pub fn classify(commits: &[Commit]) -> BumpLevel {
    commits
        .iter()
        .map(|commit| match commit.classify() {
            Classified::Kept(kind) => kind.rule().bump,
            Classified::Dropped => {
                debug!("Ignoring unclassified commit: {}", commit.header);
                BumpLevel::None
            }
        })
        .max()
        .unwrap_or_default()
}

/// Count classified commits per type, in rule-table order.
///
/// Types with no commits are left out.
pub fn summarize(commits: &[Commit]) -> Vec<(CommitType, usize)> {
    CommitType::ALL
        .iter()
        .map(|kind| {
            let count = commits
                .iter()
                .filter(|c| c.classify() == Classified::Kept(*kind))
                .count();
            (*kind, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits(headers: &[&str]) -> Vec<Commit> {
        headers.iter().map(|h| Commit::from_header(h)).collect()
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&[]), BumpLevel::None);
    }

    #[test]
    fn test_classify_unclassified_only() {
        assert_eq!(classify(&commits(&["zzz random message"])), BumpLevel::None);
        assert_eq!(
            classify(&commits(&["feat: conventional style", "Merge branch 'main'"])),
            BumpLevel::None
        );
    }

    #[test]
    fn test_classify_major() {
        let list = commits(&["✨ new feature", "💥 drop legacy api", "🐛 fix"]);
        assert_eq!(classify(&list), BumpLevel::Major);
    }

    #[test]
    fn test_classify_minor() {
        let list = commits(&["✨ add widget", "🐛 fix crash", "📝 update docs"]);
        assert_eq!(classify(&list), BumpLevel::Minor);
    }

    #[test]
    fn test_classify_patch() {
        assert_eq!(classify(&commits(&["🔧 ci tweak"])), BumpLevel::Patch);
        assert_eq!(classify(&commits(&["⚙️ bump deps"])), BumpLevel::Patch);
        assert_eq!(classify(&commits(&["📝 docs", "zzz noise"])), BumpLevel::Patch);
    }

    #[test]
    fn test_classify_is_order_independent() {
        let forward = commits(&["🐛 a", "✨ b", "zzz c"]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(classify(&forward), classify(&reversed));
    }

    #[test]
    fn test_classify_is_idempotent_over_duplicates() {
        let once = commits(&["🐛 a", "✨ b"]);
        let twice = commits(&["🐛 a", "✨ b", "🐛 a", "✨ b"]);
        assert_eq!(classify(&once), classify(&twice));
    }

    #[test]
    fn test_summarize() {
        let list = commits(&["🐛 a", "✨ b", "🐛 c", "zzz d"]);
        assert_eq!(
            summarize(&list),
            vec![(CommitType::Feature, 1), (CommitType::Fix, 2)]
        );
    }
}
