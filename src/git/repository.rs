use crate::domain::TagFormat;
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, ReleaseTag};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Directory holding the checked-out files
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id())
    }

    fn tag_target(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| ReleaseError::tag(format!("Cannot find tag '{}': {}", tag_name, e)))?;
        let commit = reference
            .peel_to_commit()
            .map_err(|e| ReleaseError::tag(format!("Cannot peel tag '{}': {}", tag_name, e)))?;
        Ok(commit.id())
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::branch(
                "HEAD is detached; pass --branch to name the release branch",
            ));
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::branch("Branch name is not valid UTF-8"))
    }

    fn latest_tag(&self, format: &TagFormat) -> Result<Option<ReleaseTag>> {
        let head = self.head_oid()?;
        let names = self.repo.tag_names(None)?;

        let mut latest: Option<ReleaseTag> = None;
        for name in names.iter().flatten() {
            let Some(version) = format.parse(name) else {
                continue;
            };
            let target = self.tag_target(name)?;
            let reachable = target == head || self.repo.graph_descendant_of(head, target)?;
            if !reachable {
                debug!("Tag {} is not reachable from HEAD", name);
                continue;
            }
            if latest.as_ref().map_or(true, |l| version > l.version) {
                latest = Some(ReleaseTag {
                    name: name.to_string(),
                    version,
                });
            }
        }

        Ok(latest)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(self.head_oid()?)?;
        if let Some(tag) = tag {
            revwalk.hide(self.tag_target(tag)?)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = commit.message().unwrap_or_default().to_string();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message,
            });
        }

        Ok(commits)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let object = self
            .repo
            .find_object(self.head_oid()?, None)
            .map_err(|e| ReleaseError::tag(format!("Cannot find HEAD object: {}", e)))?;

        self.repo
            .tag_lightweight(name, &object, false)
            .map_err(|e| ReleaseError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}
