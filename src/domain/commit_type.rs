//! The closed gitmoji rule table.
//!
//! Every recognised leading token is a [`CommitType`] variant, and its bump
//! and section come from an exhaustive `match`. Tokens outside the table are
//! unclassified.

use super::section::Section;
use super::version::BumpLevel;

/// Bump level and release-notes section attached to a commit type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRule {
    pub bump: BumpLevel,
    pub section: Section,
}

/// Recognised gitmoji commit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    /// 💥
    Breaking,
    /// ✨
    Feature,
    /// 🐛
    Fix,
    /// 📝
    Docs,
    /// 🔧
    Config,
    /// ⚙️
    Maintenance,
}

impl CommitType {
    pub const ALL: [CommitType; 6] = [
        CommitType::Breaking,
        CommitType::Feature,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Config,
        CommitType::Maintenance,
    ];

    /// Look up the commit type for a header's leading token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "💥" => Some(CommitType::Breaking),
            "✨" => Some(CommitType::Feature),
            "🐛" => Some(CommitType::Fix),
            "📝" => Some(CommitType::Docs),
            "🔧" => Some(CommitType::Config),
            // Editors frequently drop the U+FE0F variation selector.
            "⚙️" | "⚙" => Some(CommitType::Maintenance),
            _ => None,
        }
    }

    /// Canonical token for this type
    pub fn token(&self) -> &'static str {
        match self {
            CommitType::Breaking => "💥",
            CommitType::Feature => "✨",
            CommitType::Fix => "🐛",
            CommitType::Docs => "📝",
            CommitType::Config => "🔧",
            CommitType::Maintenance => "⚙️",
        }
    }

    pub fn rule(&self) -> TypeRule {
        let (bump, section) = match self {
            CommitType::Breaking => (BumpLevel::Major, Section::BreakingChanges),
            CommitType::Feature => (BumpLevel::Minor, Section::Features),
            CommitType::Fix => (BumpLevel::Patch, Section::BugFixes),
            CommitType::Docs => (BumpLevel::Patch, Section::Documentation),
            CommitType::Config | CommitType::Maintenance => {
                (BumpLevel::Patch, Section::Maintenance)
            }
        };
        TypeRule { bump, section }
    }
}
