//! Pure formatting functions for UI output.
//!
//! Everything here writes to the terminal and nothing else; the workflow never
//! prints on its own.

use console::style;

use crate::analyzer::summarize;
use crate::artifact::ReleaseAsset;
use crate::boundary::{BoundaryWarning, NoReleaseReason};
use crate::cli::ReleasePlan;
use crate::domain::Commit;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning in yellow.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the commits feeding a release decision.
///
/// Shows up to 10 headers, then a per-type tally of the classified ones.
pub fn display_commit_analysis(commits: &[Commit], branch_name: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing commits on branch '{}'", branch_name)).bold()
    );
    println!(
        "{}",
        style(format!("{} commits since last release:", commits.len())).underlined()
    );

    for (i, commit) in commits.iter().take(10).enumerate() {
        let short_msg: String = commit.header.chars().take(60).collect();
        println!("  {}. {}", i + 1, short_msg);
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }

    for (kind, count) in summarize(commits) {
        println!("  {} × {}", kind.token(), count);
    }
}

/// Display the version change a plan proposes.
pub fn display_plan(plan: &ReleasePlan) {
    match &plan.previous {
        Some(previous) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(&previous.name).red());
            println!("  To:   {} ({})", style(&plan.tag).green(), plan.bump);
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {}", style(&plan.tag).green());
        }
    }
}

/// Print the rendered release notes.
pub fn display_notes(notes: &str) {
    println!("\n{}", notes.trim_end());
}

/// Display the staged asset.
pub fn display_asset(asset: &ReleaseAsset, label: &str) {
    display_success(&format!(
        "Staged {} as {}",
        label,
        style(asset.path.display()).cyan()
    ));
}

/// Display why no release is being made.
pub fn display_no_release(reason: &NoReleaseReason) {
    display_status(&format!("No release: {}", reason));
}
