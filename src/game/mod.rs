//! Game state
//!
//! The per-game session state machine, its guess entries and the snapshot
//! format used to persist it.

mod entry;
mod error;
mod session;
mod snapshot;

pub use entry::{GuessEntry, GuessSource, NOT_FOUND_MESSAGE};
pub use error::{GameError, GuessRejection, SnapshotError};
pub use session::{GameSession, Outcome};
pub use snapshot::{EntryRecord, Snapshot};
