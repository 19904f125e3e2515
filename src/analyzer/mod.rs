//! Analysis engine for determining the release bump from commits

pub mod classifier;

pub use classifier::{classify, summarize};
