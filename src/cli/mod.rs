//! Command-line workflow, separated from argument parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{
    plan_release, run_release_workflow, Decision, ReleaseOutcome, ReleasePlan,
    ReleaseWorkflowArgs, WorkflowResult,
};
