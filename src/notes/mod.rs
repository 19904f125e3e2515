//! Release notes: grouping commits into sections, rendering, and changelog upkeep

pub mod changelog;
pub mod render;
pub mod transform;

pub use changelog::write_changelog;
pub use render::ReleaseNotes;
pub use transform::{transform, NoteEntry, NoteGroup};
