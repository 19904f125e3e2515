//! User interface module - terminal output for the release binary.

pub mod formatter;

pub use formatter::{
    display_asset, display_boundary_warning, display_commit_analysis, display_error,
    display_no_release, display_notes, display_plan, display_status, display_success,
};
