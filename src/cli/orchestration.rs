//! Release workflow orchestration
//!
//! Reads history once, feeds it to the classifier and the notes transformer,
//! then performs the side-effecting steps in an order that keeps the
//! irreversible one (tagging) last. Every failure aborts the run.

use std::path::PathBuf;

use chrono::NaiveDate;
use semver::Version;
use tracing::{info, warn};

use crate::analyzer::classify;
use crate::artifact::{ArtifactResolver, ReleaseAsset};
use crate::boundary::{BoundaryWarning, NoReleaseReason};
use crate::config::Config;
use crate::domain::{next_version, BranchContext, BumpLevel, Classified, Commit};
use crate::error::Result;
use crate::git::{ReleaseTag, Repository};
use crate::notes::{transform, write_changelog, ReleaseNotes};

/// Arguments for the release workflow
///
/// Mirrors the CLI flags in a form the workflow can be called with
/// programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Root that relative config paths (artifact dir, changelog) resolve against
    pub root: PathBuf,

    /// Branch name to use instead of the checked-out one
    pub branch: Option<String>,

    /// Plan only: no artifact staging, changelog write or tag
    pub dry_run: bool,

    /// Stage the artifact and write the changelog, but leave tagging to someone else
    pub no_tag: bool,

    /// Date stamped on the release notes
    pub date: NaiveDate,
}

/// Everything decided about the next release before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub branch: String,
    pub previous: Option<ReleaseTag>,
    pub commits: Vec<Commit>,
    pub bump: BumpLevel,
    pub version: Version,
    pub tag: String,
    pub notes: ReleaseNotes,
    pub release_message: String,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of planning: either a release or a reason there is none
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Skip {
        reason: NoReleaseReason,
        warnings: Vec<BoundaryWarning>,
    },
    Release(ReleasePlan),
}

/// What a completed release run did
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub plan: ReleasePlan,
    /// The staged asset; `None` in dry-run mode
    pub asset: Option<ReleaseAsset>,
    pub changelog: Option<PathBuf>,
    pub tagged: bool,
}

/// Terminal state of the workflow. Both variants are successes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    NoReleaseWarranted {
        reason: NoReleaseReason,
        warnings: Vec<BoundaryWarning>,
    },
    Released(WorkflowResult),
}

/// Decide whether and what to release, without touching the filesystem.
pub fn plan_release<R: Repository>(
    repo: &R,
    config: &Config,
    branch: Option<&str>,
    date: NaiveDate,
) -> Result<Decision> {
    let branch = match branch {
        Some(name) => name.to_string(),
        None => repo.current_branch()?,
    };
    let context = BranchContext::new(branch, &config.branches);
    if !context.is_release_branch() {
        return Ok(Decision::Skip {
            reason: NoReleaseReason::NotReleaseBranch {
                branch: context.name,
            },
            warnings: Vec::new(),
        });
    }

    let tag_format = config.tag_format()?;
    let previous = repo.latest_tag(&tag_format)?;
    let mut warnings = Vec::new();
    if previous.is_none() {
        warnings.push(BoundaryWarning::NoMatchingTag {
            tag_format: config.tag_format.clone(),
        });
    }

    let commits: Vec<Commit> = repo
        .commits_since(previous.as_ref().map(|t| t.name.as_str()))?
        .iter()
        .map(|info| info.to_commit())
        .collect();
    info!(
        "Found {} commits since {}",
        commits.len(),
        previous.as_ref().map_or("the beginning", |t| t.name.as_str())
    );

    if commits.is_empty() {
        if let Some(tag) = &previous {
            warnings.push(BoundaryWarning::NoNewCommits {
                latest_tag: tag.name.clone(),
            });
        }
        return Ok(Decision::Skip {
            reason: NoReleaseReason::NoCommits,
            warnings,
        });
    }

    let ignored = commits
        .iter()
        .filter(|c| c.classify() == Classified::Dropped)
        .count();
    if ignored > 0 {
        warnings.push(BoundaryWarning::UnclassifiedCommits {
            ignored,
            total: commits.len(),
        });
    }

    let bump = classify(&commits);
    let Some(version) = next_version(previous.as_ref().map(|t| &t.version), bump)? else {
        return Ok(Decision::Skip {
            reason: NoReleaseReason::NoClassifiedCommits,
            warnings,
        });
    };
    info!("Release bump is {}; next version {}", bump, version);

    let notes = ReleaseNotes::new(
        version.clone(),
        date,
        transform(&commits, &config.section_order),
    );

    Ok(Decision::Release(ReleasePlan {
        branch: context.name,
        tag: tag_format.format(&version),
        release_message: config.release_message_for(&version),
        previous,
        commits,
        bump,
        version,
        notes,
        warnings,
    }))
}

/// Main release workflow
///
/// 1. Plan the release (branch check, history, bump, notes)
/// 2. Stage the artifact under its canonical name
/// 3. Prepend the notes to the changelog
/// 4. Tag HEAD
///
/// Dry-run stops after step 1. A failure at any step aborts the run; steps
/// already completed are not undone.
pub fn run_release_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    args: &ReleaseWorkflowArgs,
) -> Result<ReleaseOutcome> {
    let plan = match plan_release(repo, config, args.branch.as_deref(), args.date)? {
        Decision::Skip { reason, warnings } => {
            info!("No release: {}", reason);
            return Ok(ReleaseOutcome::NoReleaseWarranted { reason, warnings });
        }
        Decision::Release(plan) => plan,
    };
    for warning in &plan.warnings {
        warn!("{}", warning);
    }

    if args.dry_run {
        return Ok(ReleaseOutcome::Released(WorkflowResult {
            plan,
            asset: None,
            changelog: None,
            tagged: false,
        }));
    }

    let resolver = ArtifactResolver::from_config(&args.root, &config.artifact)?;
    let asset = resolver.resolve(&plan.version)?;

    let changelog_path = args.root.join(&config.changelog_file);
    write_changelog(&changelog_path, &plan.notes.render())?;
    info!("Updated {}", changelog_path.display());

    if !args.no_tag {
        repo.create_tag(&plan.tag)?;
        info!("Created tag {}", plan.tag);
    }

    Ok(ReleaseOutcome::Released(WorkflowResult {
        plan,
        asset: Some(asset),
        changelog: Some(changelog_path),
        tagged: !args.no_tag,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Section;
    use crate::error::ReleaseError;
    use crate::git::MockRepository;
    use std::fs;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn repo_with(headers: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit("0000000000", "📝 initial");
        repo.tag_head("v1.2.3");
        for (i, header) in headers.iter().enumerate() {
            repo.add_commit(format!("{:07}abc", i + 1), *header);
        }
        repo
    }

    fn args(root: &TempDir) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            root: root.path().to_path_buf(),
            branch: None,
            dry_run: false,
            no_tag: false,
            date: date(),
        }
    }

    #[test]
    fn test_plan_minor_release() {
        let repo = repo_with(&["✨ add widget", "🐛 fix crash", "📝 update docs"]);
        let decision = plan_release(&repo, &Config::default(), None, date()).unwrap();

        let Decision::Release(plan) = decision else {
            panic!("expected a release");
        };
        assert_eq!(plan.bump, BumpLevel::Minor);
        assert_eq!(plan.version, Version::new(1, 3, 0));
        assert_eq!(plan.tag, "v1.3.0");
        assert_eq!(plan.release_message, "🔖 Release v1.3.0\n\n[skip ci]");
        let sections: Vec<Section> = plan.notes.groups.iter().map(|g| g.section).collect();
        assert_eq!(
            sections,
            vec![Section::Features, Section::BugFixes, Section::Documentation]
        );
    }

    #[test]
    fn test_plan_unrecognised_commits_skip() {
        let repo = repo_with(&["zzz random message"]);
        let decision = plan_release(&repo, &Config::default(), None, date()).unwrap();
        assert_eq!(
            decision,
            Decision::Skip {
                reason: NoReleaseReason::NoClassifiedCommits,
                warnings: vec![BoundaryWarning::UnclassifiedCommits {
                    ignored: 1,
                    total: 1
                }],
            }
        );
    }

    #[test]
    fn test_plan_no_commits_since_tag() {
        let repo = repo_with(&[]);
        let decision = plan_release(&repo, &Config::default(), None, date()).unwrap();
        assert_eq!(
            decision,
            Decision::Skip {
                reason: NoReleaseReason::NoCommits,
                warnings: vec![BoundaryWarning::NoNewCommits {
                    latest_tag: "v1.2.3".to_string()
                }],
            }
        );
    }

    #[test]
    fn test_plan_wrong_branch() {
        let mut repo = repo_with(&["✨ add widget"]);
        repo.set_branch("feature/x");
        let decision = plan_release(&repo, &Config::default(), None, date()).unwrap();
        assert!(matches!(
            decision,
            Decision::Skip {
                reason: NoReleaseReason::NotReleaseBranch { .. },
                ..
            }
        ));

        let decision =
            plan_release(&repo, &Config::default(), Some("main"), date()).unwrap();
        assert!(matches!(decision, Decision::Release(_)));
    }

    #[test]
    fn test_first_release() {
        let mut repo = MockRepository::new();
        repo.add_commit("abcdef123456", "🔧 ci tweak");
        let Decision::Release(plan) =
            plan_release(&repo, &Config::default(), None, date()).unwrap()
        else {
            panic!("expected a release");
        };
        assert_eq!(plan.version, Version::new(1, 0, 0));
        assert_eq!(plan.previous, None);
        assert!(plan
            .warnings
            .iter()
            .any(|w| matches!(w, BoundaryWarning::NoMatchingTag { .. })));
    }

    #[test]
    fn test_plan_version_overflow_is_an_error() {
        let mut repo = MockRepository::new();
        repo.add_commit("0000000000", "📝 initial");
        repo.tag_head(format!("v{}.0.0", u64::MAX));
        repo.add_commit("1111111111", "💥 drop legacy api");

        let err = plan_release(&repo, &Config::default(), None, date()).unwrap_err();
        assert!(matches!(err, ReleaseError::Version(_)));
    }

    #[test]
    fn test_run_full_release() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("windtrader-java-1.0-SNAPSHOT.jar"), b"shaded").unwrap();
        fs::write(target.join("original-windtrader-java-1.0-SNAPSHOT.jar"), b"raw").unwrap();

        let repo = repo_with(&["🐛 fix crash"]);
        let outcome = run_release_workflow(&repo, &Config::default(), &args(&root)).unwrap();

        let ReleaseOutcome::Released(result) = outcome else {
            panic!("expected a release");
        };
        let asset = result.asset.unwrap();
        assert_eq!(asset.path, target.join("windtrader-java-1.2.4.jar"));
        assert_eq!(fs::read(&asset.path).unwrap(), b"shaded");
        assert!(result.tagged);
        assert_eq!(repo.created_tags(), vec!["v1.2.4".to_string()]);

        let changelog = fs::read_to_string(root.path().join("CHANGELOG.md")).unwrap();
        assert!(changelog.contains("## 1.2.4 (2024-05-01)"));
        assert!(changelog.contains("* fix crash (0000001)"));
    }

    #[test]
    fn test_missing_artifact_aborts_before_changelog_and_tag() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("original-app.jar"), b"raw").unwrap();

        let repo = repo_with(&["✨ add widget"]);
        let err = run_release_workflow(&repo, &Config::default(), &args(&root)).unwrap_err();

        assert!(matches!(err, ReleaseError::NoArtifactFound { .. }));
        assert!(!root.path().join("CHANGELOG.md").exists());
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let root = TempDir::new().unwrap();
        let repo = repo_with(&["💥 drop legacy api"]);
        let mut dry = args(&root);
        dry.dry_run = true;

        let ReleaseOutcome::Released(result) =
            run_release_workflow(&repo, &Config::default(), &dry).unwrap()
        else {
            panic!("expected a release");
        };
        assert_eq!(result.plan.version, Version::new(2, 0, 0));
        assert_eq!(result.asset, None);
        assert!(!result.tagged);
        assert!(!root.path().join("CHANGELOG.md").exists());
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_no_tag_still_stages_asset() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("app.jar"), b"jar").unwrap();

        let repo = repo_with(&["📝 docs"]);
        let mut no_tag = args(&root);
        no_tag.no_tag = true;

        let ReleaseOutcome::Released(result) =
            run_release_workflow(&repo, &Config::default(), &no_tag).unwrap()
        else {
            panic!("expected a release");
        };
        assert!(result.asset.is_some());
        assert!(!result.tagged);
        assert!(repo.created_tags().is_empty());
    }
}
