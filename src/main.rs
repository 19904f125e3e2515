use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitmoji_release::cli::{
    plan_release, run_release_workflow, Decision, ReleaseOutcome, ReleaseWorkflowArgs,
};
use gitmoji_release::config::{self, Config};
use gitmoji_release::git::Git2Repository;
use gitmoji_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "gitmoji-release",
    version,
    about = "Cut a release from gitmoji commits: version bump, release notes and the artifact to publish"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Path inside the repository to release")]
    repo: PathBuf,

    #[arg(short, long, help = "Release branch name, for detached checkouts")]
    branch: Option<String>,

    #[arg(long, help = "Preview the release without staging, writing or tagging")]
    dry_run: bool,

    #[arg(long, help = "Stage the artifact and changelog but do not create the tag")]
    no_tag: bool,

    #[arg(long, help = "Print the bump and release notes, then exit")]
    notes_only: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gitmoji_release={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let repo = Git2Repository::open(&args.repo).context("Not a git repository")?;
    let root = repo
        .workdir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| args.repo.clone());
    let today = chrono::Local::now().date_naive();

    if args.notes_only {
        return print_notes(&repo, &config, args.branch.as_deref(), today);
    }

    let workflow_args = ReleaseWorkflowArgs {
        root,
        branch: args.branch,
        dry_run: args.dry_run,
        no_tag: args.no_tag,
        date: today,
    };

    match run_release_workflow(&repo, &config, &workflow_args)? {
        ReleaseOutcome::NoReleaseWarranted { reason, warnings } => {
            for warning in &warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_no_release(&reason);
        }
        ReleaseOutcome::Released(result) => {
            let plan = &result.plan;
            for warning in &plan.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_commit_analysis(&plan.commits, &plan.branch);
            ui::display_plan(plan);
            ui::display_notes(&plan.notes.render());

            if workflow_args.dry_run {
                ui::display_status("Dry run: no artifact staged, changelog untouched, no tag created");
                return Ok(());
            }
            if let Some(asset) = &result.asset {
                ui::display_asset(asset, &config.artifact.label);
            }
            if let Some(path) = &result.changelog {
                ui::display_success(&format!("Updated {}", path.display()));
            }
            if result.tagged {
                ui::display_success(&format!("Created tag: {}", plan.tag));
            }
            ui::display_status(&format!(
                "Release commit message: {}",
                plan.release_message.replace('\n', "\\n")
            ));
        }
    }

    Ok(())
}

fn print_notes(
    repo: &Git2Repository,
    config: &Config,
    branch: Option<&str>,
    today: chrono::NaiveDate,
) -> Result<()> {
    match plan_release(repo, config, branch, today)? {
        Decision::Skip { reason, .. } => ui::display_no_release(&reason),
        Decision::Release(plan) => {
            println!("{} {}", plan.bump, plan.version);
            ui::display_notes(&plan.notes.render());
        }
    }
    Ok(())
}
