//! Domain logic - pure release rules independent of git and the filesystem

pub mod branch;
pub mod commit;
pub mod commit_type;
pub mod section;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use commit::{Classified, Commit};
pub use commit_type::{CommitType, TypeRule};
pub use section::Section;
pub use tag::TagFormat;
pub use version::{next_version, BumpLevel};
