use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Release-notes section a classified commit is listed under.
///
/// Serializes to its display title (e.g. `"Bug Fixes"`) so config files can
/// spell the section order the way it appears in the changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    BreakingChanges,
    Features,
    BugFixes,
    Documentation,
    Maintenance,
    Other,
}

impl Section {
    /// Priority order used when no order is configured
    pub const DEFAULT_ORDER: [Section; 6] = [
        Section::BreakingChanges,
        Section::Features,
        Section::BugFixes,
        Section::Documentation,
        Section::Maintenance,
        Section::Other,
    ];

    /// Get the display title for the section.
    pub fn title(&self) -> &'static str {
        match self {
            Self::BreakingChanges => "Breaking Changes",
            Self::Features => "Features",
            Self::BugFixes => "Bug Fixes",
            Self::Documentation => "Documentation",
            Self::Maintenance => "Maintenance",
            Self::Other => "Other",
        }
    }

    /// Position of this section in `order`; unlisted sections rank after every listed one.
    pub fn rank(&self, order: &[Section]) -> usize {
        order
            .iter()
            .position(|s| s == self)
            .unwrap_or(order.len())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::DEFAULT_ORDER
            .iter()
            .find(|section| section.title().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title())
    }
}

impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Section>().map_err(serde::de::Error::custom)
    }
}
