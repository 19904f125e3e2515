use crate::error::{ReleaseError, Result};
use semver::Version;

const PLACEHOLDER: &str = "{version}";

/// Release tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFormat {
    prefix: String,
    suffix: String,
}

impl TagFormat {
    /// Create a tag format; the pattern must hold exactly one `{version}` placeholder
    pub fn new(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(PLACEHOLDER).collect();
        match parts.as_slice() {
            [prefix, suffix] => Ok(TagFormat {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            _ => Err(ReleaseError::tag(format!(
                "Invalid tag format '{}': should have exactly one {{version}} placeholder",
                pattern
            ))),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// Extract the semantic version from a tag that matches this format
    pub fn parse(&self, tag: &str) -> Option<Version> {
        let version = tag
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        Version::parse(version).ok()
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.parse(tag).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let format = TagFormat::new("v{version}").unwrap();
        assert_eq!(format.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_format_with_suffix() {
        let format = TagFormat::new("release-{version}-final").unwrap();
        assert_eq!(format.format(&Version::new(1, 2, 3)), "release-1.2.3-final");
    }

    #[test]
    fn test_parse() {
        let format = TagFormat::new("v{version}").unwrap();
        assert_eq!(format.parse("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(format.parse("1.2.3"), None);
        assert_eq!(format.parse("v1.2"), None);
        assert_eq!(format.parse("vnext"), None);
    }

    #[test]
    fn test_matches() {
        let format = TagFormat::new("v{version}").unwrap();
        assert!(format.matches("v1.2.3"));
        assert!(format.matches("v2.0.0-rc.1"));
        assert!(!format.matches("release-1.2.3"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(TagFormat::new("v").is_err());
        assert!(TagFormat::new("{version}-{version}").is_err());
    }
}
