//! Persisted game state
//!
//! The snapshot is the JSON document stored per game under
//! `gameState_<game id>`. Field names follow the stored format:
//!
//! ```text
//! {
//!   "guesses":    [{"word", "rank", "error", "errorMessage"?, "gaveUp"?}],
//!   "hints":      [{"word", "rank", "error", "isHint"}],
//!   "guessCount": 3,
//!   "hintCount":  1,
//!   "bestRank":   17 | null,
//!   "isGoingUp":  false,
//!   "lastWord":   "..." | null,
//!   "didWin":     false,
//!   "didGiveUp":  false,
//!   "giveUpWord": "..." | null
//! }
//! ```
//!
//! An infinite rank is stored as `null`.

use super::entry::{GuessEntry, GuessSource};
use super::error::SnapshotError;
use super::session::{GameSession, Outcome};
use crate::core::{GameKey, Rank, normalize};
use crate::solver::SearchDirection;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if signature
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Stored form of one guess or hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub word: String,
    #[serde(default)]
    pub rank: Rank,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub gave_up: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hint: bool,
}

impl From<&GuessEntry> for EntryRecord {
    fn from(entry: &GuessEntry) -> Self {
        Self {
            word: entry.word.clone(),
            rank: entry.rank,
            error: entry.is_error,
            error_message: entry.error_message.clone(),
            gave_up: entry.source == GuessSource::GiveUp,
            is_hint: entry.source == GuessSource::Hint,
        }
    }
}

impl From<EntryRecord> for GuessEntry {
    fn from(record: EntryRecord) -> Self {
        let source = if record.is_hint {
            GuessSource::Hint
        } else if record.gave_up {
            GuessSource::GiveUp
        } else {
            GuessSource::Guess
        };

        Self {
            word: record.word,
            rank: record.rank,
            is_error: record.error,
            error_message: record.error_message,
            source,
        }
    }
}

/// Stored form of a whole session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub guesses: Vec<EntryRecord>,
    pub hints: Vec<EntryRecord>,
    pub guess_count: u32,
    pub hint_count: u32,
    #[serde(default)]
    pub best_rank: Rank,
    pub is_going_up: bool,
    pub last_word: Option<String>,
    pub did_win: bool,
    pub did_give_up: bool,
    pub give_up_word: Option<String>,
}

impl Snapshot {
    /// Serialize to the stored JSON text
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse stored JSON text
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Json` for malformed documents.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Check the invariants every reachable session satisfies
    fn validate(&self) -> Result<(), SnapshotError> {
        if self.did_win && self.did_give_up {
            return Err(SnapshotError::ConflictingOutcome);
        }

        if self.hints.iter().any(|h| !h.is_hint || h.gave_up) {
            return Err(SnapshotError::MisplacedEntry("guess"));
        }
        if self.guesses.iter().any(|g| g.is_hint) {
            return Err(SnapshotError::MisplacedEntry("hint"));
        }
        if self.guesses.iter().any(|g| g.gave_up) && !self.did_give_up {
            return Err(SnapshotError::MisplacedEntry("give-up"));
        }

        // ranks start at 1; only rejected guesses carry an infinite rank
        let impossible = self.guesses.iter().chain(&self.hints).find(|record| {
            record.rank == Rank::Ranked(0)
                || (record.is_hint && record.error)
                || (!record.error && !record.rank.is_finite())
        });
        if let Some(record) = impossible {
            return Err(SnapshotError::InvalidRank(record.word.clone()));
        }

        let mut seen = FxHashSet::default();
        for guess in &self.guesses {
            let word = normalize(&guess.word);
            if !seen.insert(word.clone()) {
                return Err(SnapshotError::DuplicateGuess(word));
            }
        }

        let valid = || {
            self.guesses
                .iter()
                .chain(&self.hints)
                .filter(|record| !record.error)
        };

        let computed = valid().map(|record| record.rank).min().unwrap_or_default();
        if computed != self.best_rank {
            return Err(SnapshotError::BestRankMismatch {
                stored: self.best_rank,
                computed,
            });
        }

        let has_secret = valid().any(|record| record.rank.is_secret());
        let finished = self.did_win || self.did_give_up;
        if finished && !has_secret {
            return Err(SnapshotError::MissingSecret);
        }
        if !finished && has_secret {
            return Err(SnapshotError::UnexpectedSecret);
        }
        if self.did_give_up && self.give_up_word.is_none() {
            return Err(SnapshotError::MissingSecret);
        }

        Ok(())
    }
}

impl GameSession {
    /// Capture the session in its stored form
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            guesses: self.guesses.iter().map(EntryRecord::from).collect(),
            hints: self.hints.iter().map(EntryRecord::from).collect(),
            guess_count: self.guess_count,
            hint_count: self.hint_count,
            best_rank: self.best_rank,
            is_going_up: self.direction.is_ascending(),
            last_word: self.last_word.clone(),
            did_win: self.outcome == Outcome::Won,
            did_give_up: self.outcome == Outcome::GaveUp,
            give_up_word: match self.outcome {
                Outcome::GaveUp => self.secret_word.clone(),
                Outcome::Active | Outcome::Won => None,
            },
        }
    }

    /// Rebuild a session from a snapshot
    ///
    /// # Errors
    ///
    /// Returns a `SnapshotError` naming the first violated invariant.
    pub fn from_snapshot(key: GameKey, snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let outcome = if snapshot.did_win {
            Outcome::Won
        } else if snapshot.did_give_up {
            Outcome::GaveUp
        } else {
            Outcome::Active
        };

        let guesses: Vec<GuessEntry> = snapshot.guesses.into_iter().map(Into::into).collect();
        let hints: Vec<GuessEntry> = snapshot.hints.into_iter().map(Into::into).collect();

        let secret_word = match outcome {
            Outcome::Active => None,
            Outcome::Won => guesses
                .iter()
                .chain(&hints)
                .find(|entry| entry.is_secret())
                .map(|entry| entry.word.clone()),
            Outcome::GaveUp => snapshot.give_up_word,
        };

        let mut session = Self::new(key);
        session.guesses = guesses;
        session.hints = hints;
        session.guess_count = snapshot.guess_count;
        session.hint_count = snapshot.hint_count;
        session.best_rank = snapshot.best_rank;
        session.direction = if snapshot.is_going_up {
            SearchDirection::Ascending
        } else {
            SearchDirection::Descending
        };
        session.outcome = outcome;
        session.secret_word = secret_word;
        session.last_word = snapshot.last_word;
        Ok(session)
    }

    /// Restore a session from stored JSON, falling back to a fresh game
    ///
    /// Corrupt or inconsistent snapshots are discarded with a warning; this
    /// never fails.
    #[must_use]
    pub fn restore(key: GameKey, raw: &str) -> Self {
        match Snapshot::from_json(raw).and_then(|s| Self::from_snapshot(key.clone(), s)) {
            Ok(session) => {
                tracing::debug!(%key, "session restored");
                session
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "discarding corrupt snapshot");
                Self::new(key)
            }
        }
    }
}
