//! Error types for game operations

use crate::core::Rank;
use thiserror::Error;

/// Why a guess was refused without touching the session
///
/// These are ordinary user-facing outcomes, shown to the player as messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("enter a word first")]
    Empty,
    #[error("\"{0}\" was already guessed")]
    Duplicate(String),
    #[error("\"{0}\" is not in the word list")]
    NotAllowed(String),
    #[error("the game is over")]
    GameOver,
    #[error("this game's words are not loaded")]
    RankingUnavailable,
}

/// Failures caused by inconsistent ranking data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The planner picked a rank the ranking does not hold
    #[error("ranking has no word at rank {rank} (max rank {max_rank})")]
    MissingRank { rank: u32, max_rank: u32 },
}

/// Reasons a persisted snapshot is rejected on restore
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot marks the game both won and given up")]
    ConflictingOutcome,
    #[error("snapshot has a {0} entry in the wrong list")]
    MisplacedEntry(&'static str),
    #[error("snapshot entry \"{0}\" has an impossible rank")]
    InvalidRank(String),
    #[error("snapshot repeats the guess \"{0}\"")]
    DuplicateGuess(String),
    #[error("snapshot best rank {stored} does not match its entries ({computed})")]
    BestRankMismatch { stored: Rank, computed: Rank },
    #[error("snapshot is finished but does not reveal the secret word")]
    MissingSecret,
    #[error("snapshot is still active but already contains the secret word")]
    UnexpectedSecret,
}
