//! Snapshot persistence
//!
//! Stores hold one JSON snapshot per game under `gameState_<game id>`.

mod manager;
pub(crate) mod store;

pub use manager::{SessionManager, load_session, save_session};
pub use store::{FileStore, MemoryStore, SnapshotStore, StoreError};
