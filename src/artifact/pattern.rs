use glob::Pattern;
use semver::Version;

use crate::error::{ReleaseError, Result};

const PLACEHOLDER: &str = "{version}";

/// Shell-style file name pattern (`*`, `?`, `[...]`).
///
/// Matching is against the bare file name, never a path.
#[derive(Debug, Clone)]
pub struct FileGlob {
    pattern: Pattern,
}

impl FileGlob {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| {
            ReleaseError::config(format!("Invalid file pattern '{}': {}", pattern, e))
        })?;
        Ok(FileGlob { pattern })
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Canonical artifact name such as `windtrader-java-{version}.jar`.
#[derive(Debug, Clone)]
pub struct ArtifactName {
    prefix: String,
    suffix: String,
    glob: FileGlob,
}

impl ArtifactName {
    /// The pattern must hold exactly one `{version}` placeholder
    pub fn new(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(PLACEHOLDER).collect();
        let [prefix, suffix] = parts.as_slice() else {
            return Err(ReleaseError::config(format!(
                "Invalid artifact name '{}': should have exactly one {{version}} placeholder",
                pattern
            )));
        };
        if prefix.contains('*') || suffix.contains('*') {
            return Err(ReleaseError::config(format!(
                "Invalid artifact name '{}': wildcards are not allowed",
                pattern
            )));
        }

        Ok(ArtifactName {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            glob: FileGlob::new(&format!(
                "{}*{}",
                Pattern::escape(prefix),
                Pattern::escape(suffix)
            ))?,
        })
    }

    /// File name for a concrete release
    pub fn instantiate(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// Publish glob: the name with the version replaced by `*`
    pub fn glob(&self) -> &FileGlob {
        &self.glob
    }

    /// Version of a file left behind by an earlier release, if `file_name` is one
    pub fn released_version(&self, file_name: &str) -> Option<Version> {
        let version = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        Version::parse(version).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matches_prefix_pattern() {
        let glob = FileGlob::new("original-*.jar").unwrap();
        assert!(glob.is_match("original-windtrader-java-1.0-SNAPSHOT.jar"));
        assert!(glob.is_match("original-.jar"));
        assert!(!glob.is_match("windtrader-java-1.0-SNAPSHOT.jar"));
        assert!(!glob.is_match("original-app.jar.bak"));
    }

    #[test]
    fn test_glob_treats_regex_characters_literally() {
        let glob = FileGlob::new("app+(1).jar").unwrap();
        assert!(glob.is_match("app+(1).jar"));
        assert!(!glob.is_match("appp(1).jar"));
        assert!(!glob.is_match("app+(1)xjar"));
    }

    #[test]
    fn test_glob_rejects_malformed_pattern() {
        let err = FileGlob::new("original-[*.jar").unwrap_err();
        assert!(err.to_string().contains("Invalid file pattern"));
    }

    #[test]
    fn test_artifact_name_escapes_glob_characters() {
        let name = ArtifactName::new("app[linux]-{version}.jar").unwrap();
        assert_eq!(name.glob().as_str(), "app[[]linux[]]-*.jar");
        assert!(name.glob().is_match("app[linux]-1.0.0.jar"));
        assert!(!name.glob().is_match("appl-1.0.0.jar"));
    }

    #[test]
    fn test_glob_without_wildcard_is_exact() {
        let glob = FileGlob::new("app.jar").unwrap();
        assert!(glob.is_match("app.jar"));
        assert!(!glob.is_match("app.jar2"));
        assert_eq!(glob.as_str(), "app.jar");
    }

    #[test]
    fn test_artifact_name_instantiate_and_glob() {
        let name = ArtifactName::new("windtrader-java-{version}.jar").unwrap();
        assert_eq!(
            name.instantiate(&Version::new(1, 4, 0)),
            "windtrader-java-1.4.0.jar"
        );
        assert_eq!(name.glob().as_str(), "windtrader-java-*.jar");
        assert!(name.glob().is_match("windtrader-java-1.0-SNAPSHOT.jar"));
    }

    #[test]
    fn test_released_version() {
        let name = ArtifactName::new("windtrader-java-{version}.jar").unwrap();
        assert_eq!(
            name.released_version("windtrader-java-0.9.1.jar"),
            Some(Version::new(0, 9, 1))
        );
        assert_eq!(name.released_version("windtrader-java-1.0-SNAPSHOT.jar"), None);
        assert_eq!(name.released_version("other-1.0.0.jar"), None);
    }

    #[test]
    fn test_artifact_name_rejects_bad_patterns() {
        assert!(ArtifactName::new("app.jar").is_err());
        assert!(ArtifactName::new("{version}-{version}.jar").is_err());
        assert!(ArtifactName::new("app-*-{version}.jar").is_err());
    }
}
