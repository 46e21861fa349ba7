//! Archive listing
//!
//! Past games with a ranking file, annotated with whatever progress the
//! store holds for them.

use crate::core::{GameKey, Rank};
use crate::game::Outcome;
use crate::storage::{SnapshotStore, StoreError, load_session};
use crate::wordlists::{LoadError, RankingSource};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Saved progress of one archived game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveStatus {
    NotStarted,
    InProgress,
    Won,
    GaveUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRow {
    pub date: NaiveDate,
    pub game_number: Option<u32>,
    pub status: ArchiveStatus,
    pub guess_count: u32,
    pub hint_count: u32,
    pub best_rank: Rank,
}

/// List archived games up to and including `today`, newest first
///
/// Rankings prepared for future dates are not listed.
///
/// # Errors
///
/// Returns `ArchiveError` if the rankings directory or the store cannot be
/// read.
pub fn list_archive<S: SnapshotStore + ?Sized>(
    source: &RankingSource,
    store: &S,
    today: NaiveDate,
) -> Result<Vec<ArchiveRow>, ArchiveError> {
    let mut rows = Vec::new();

    for date in source.archived_dates()?.into_iter().filter(|d| *d <= today) {
        let key = GameKey::Archive(date);
        let session = load_session(store, &key)?;

        let status = match session.outcome() {
            Outcome::Won => ArchiveStatus::Won,
            Outcome::GaveUp => ArchiveStatus::GaveUp,
            Outcome::Active if session.guesses().is_empty() && session.hints().is_empty() => {
                ArchiveStatus::NotStarted
            }
            Outcome::Active => ArchiveStatus::InProgress,
        };

        rows.push(ArchiveRow {
            date,
            game_number: key.game_number(),
            status,
            guess_count: session.guess_count(),
            hint_count: session.hint_count(),
            best_rank: session.best_rank(),
        });
    }

    tracing::debug!(games = rows.len(), "archive listed");
    Ok(rows)
}
