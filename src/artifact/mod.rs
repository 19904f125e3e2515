//! Selection and staging of the build artifact to publish

pub mod pattern;
pub mod resolver;

pub use pattern::{ArtifactName, FileGlob};
pub use resolver::{ArtifactResolver, ReleaseAsset};
