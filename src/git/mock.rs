use crate::domain::TagFormat;
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, ReleaseTag, Repository};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// History is linear: commits are kept oldest first and each tag points at
/// one of them by index.
pub struct MockRepository {
    branch: String,
    commits: Vec<CommitInfo>,
    tags: Vec<(String, usize)>,
    created_tags: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository on `main`
    pub fn new() -> Self {
        MockRepository {
            branch: "main".to_string(),
            commits: Vec::new(),
            tags: Vec::new(),
            created_tags: Mutex::new(Vec::new()),
        }
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Append a commit on top of the current history
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.commits.push(CommitInfo::new(hash, message));
    }

    /// Tag the most recent commit
    pub fn tag_head(&mut self, name: impl Into<String>) {
        let index = self.commits.len().saturating_sub(1);
        self.tags.push((name.into(), index));
    }

    /// Tags created through [`Repository::create_tag`]
    pub fn created_tags(&self) -> Vec<String> {
        self.created_tags
            .lock()
            .map(|tags| tags.clone())
            .unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn latest_tag(&self, format: &TagFormat) -> Result<Option<ReleaseTag>> {
        Ok(self
            .tags
            .iter()
            .filter_map(|(name, _)| {
                format.parse(name).map(|version| ReleaseTag {
                    name: name.clone(),
                    version,
                })
            })
            .max_by(|a, b| a.version.cmp(&b.version)))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let start = match tag {
            Some(tag) => {
                let (_, index) = self
                    .tags
                    .iter()
                    .find(|(name, _)| name == tag)
                    .ok_or_else(|| ReleaseError::tag(format!("Tag not found: {}", tag)))?;
                index + 1
            }
            None => 0,
        };
        Ok(self.commits.iter().skip(start).cloned().collect())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let mut created = self
            .created_tags
            .lock()
            .map_err(|_| ReleaseError::tag("Mock tag list poisoned"))?;
        if created.iter().any(|t| t == name) || self.tags.iter().any(|(t, _)| t == name) {
            return Err(ReleaseError::tag(format!("Tag already exists: {}", name)));
        }
        created.push(name.to_string());
        Ok(())
    }
}
