pub mod analyzer;
pub mod artifact;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod ui;

pub use error::{ReleaseError, Result};
