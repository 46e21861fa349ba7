//! Command implementations

pub mod archive;
pub mod check;
pub mod hints;
pub mod play;

pub use archive::{ArchiveError, ArchiveRow, ArchiveStatus, list_archive};
pub use check::{CheckReport, FileReport, run_check};
pub use hints::{HintPreview, HintStep, preview_hints};
pub use play::{Game, PlayCommand, PlayEvent, run_play};
