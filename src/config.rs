use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::pattern::{ArtifactName, FileGlob};
use crate::domain::{Section, TagFormat};
use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "release.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = "gitmoji-release.toml";

/// Represents the complete configuration for gitmoji-release.
///
/// Built once at startup and handed to each stage by reference.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default = "default_release_message")]
    pub release_message: String,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: PathBuf,

    #[serde(default = "default_section_order")]
    pub section_order: Vec<Section>,

    #[serde(default)]
    pub artifact: ArtifactConfig,
}

/// Returns the default list of release branches.
fn default_branches() -> Vec<String> {
    vec!["main".to_string()]
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

/// Release commit message; `[skip ci]` stops CI from re-triggering on it.
fn default_release_message() -> String {
    "🔖 Release v{version}\n\n[skip ci]".to_string()
}

fn default_changelog_file() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_section_order() -> Vec<Section> {
    Section::DEFAULT_ORDER.to_vec()
}

/// Where the build step leaves its output and how the published asset is named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArtifactConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Intermediate (pre-shaded) outputs that must never be published
    #[serde(default = "default_exclude_pattern")]
    pub exclude_pattern: String,

    #[serde(default = "default_name_pattern")]
    pub name_pattern: String,

    #[serde(default = "default_label")]
    pub label: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("target")
}

fn default_extension() -> String {
    ".jar".to_string()
}

fn default_exclude_pattern() -> String {
    "original-*.jar".to_string()
}

fn default_name_pattern() -> String {
    "windtrader-java-{version}.jar".to_string()
}

fn default_label() -> String {
    "windtrader-java shaded jar".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig {
            output_dir: default_output_dir(),
            extension: default_extension(),
            exclude_pattern: default_exclude_pattern(),
            name_pattern: default_name_pattern(),
            label: default_label(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branches: default_branches(),
            tag_format: default_tag_format(),
            release_message: default_release_message(),
            changelog_file: default_changelog_file(),
            section_order: default_section_order(),
            artifact: ArtifactConfig::default(),
        }
    }
}

impl Config {
    /// Check the pieces that can only be validated after parsing.
    pub fn validate(&self) -> Result<()> {
        if self.branches.is_empty() {
            return Err(ReleaseError::config("At least one release branch is required"));
        }
        TagFormat::new(&self.tag_format)?;
        if !self.release_message.contains("{version}") {
            return Err(ReleaseError::config(
                "release_message must contain a {version} placeholder",
            ));
        }
        if self.artifact.extension.trim_start_matches('.').is_empty() {
            return Err(ReleaseError::config("artifact.extension must not be empty"));
        }
        FileGlob::new(&self.artifact.exclude_pattern)?;
        ArtifactName::new(&self.artifact.name_pattern)?;
        Ok(())
    }

    pub fn tag_format(&self) -> Result<TagFormat> {
        TagFormat::new(&self.tag_format)
    }

    /// Release commit message for `version`
    pub fn release_message_for(&self, version: &semver::Version) -> String {
        self.release_message
            .replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `gitmoji-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration, validated
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(),
    };

    let config = match path {
        Some(path) => {
            let config_str = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str::<Config>(&config_str).map_err(|e| {
                ReleaseError::config(format!("Cannot parse {}: {}", path.display(), e))
            })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.branches, vec!["main".to_string()]);
        assert_eq!(config.artifact.output_dir, PathBuf::from("target"));
    }

    #[test]
    fn test_release_message_for() {
        let config = Config::default();
        let message = config.release_message_for(&semver::Version::new(1, 2, 0));
        assert_eq!(message, "🔖 Release v1.2.0\n\n[skip ci]");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("tag_format = \"release-{version}\"").unwrap();
        assert_eq!(config.tag_format, "release-{version}");
        assert_eq!(config.artifact, ArtifactConfig::default());
        assert_eq!(config.section_order, Section::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn test_validate_rejects_empty_branches() {
        let config = Config {
            branches: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_name_pattern_without_placeholder() {
        let mut config = Config::default();
        config.artifact.name_pattern = "app.jar".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extension() {
        let mut config = Config::default();
        config.artifact.extension = ".".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_section_is_a_parse_error() {
        let result = toml::from_str::<Config>("section_order = [\"Chores\"]");
        assert!(result.is_err());
    }
}
