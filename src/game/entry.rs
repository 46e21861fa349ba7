//! Guess list entries

use crate::core::Rank;

/// Message attached to guesses the ranking does not contain
pub const NOT_FOUND_MESSAGE: &str = "not found in this game's words";

/// How an entry came to be in the guess list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuessSource {
    /// Typed by the player
    Guess,
    /// Revealed by the hint planner
    Hint,
    /// The secret, revealed because the player gave up
    GiveUp,
}

/// One revealed word and its rank
///
/// Entries are immutable once created; the session only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessEntry {
    pub word: String,
    pub rank: Rank,
    pub is_error: bool,
    pub error_message: Option<String>,
    pub source: GuessSource,
}

impl GuessEntry {
    /// Entry for a word the ranking knows
    #[must_use]
    pub fn ranked(word: impl Into<String>, rank: u32, source: GuessSource) -> Self {
        Self {
            word: word.into(),
            rank: Rank::Ranked(rank),
            is_error: false,
            error_message: None,
            source,
        }
    }

    /// Entry for a player guess the ranking does not contain
    #[must_use]
    pub fn not_found(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            rank: Rank::Infinite,
            is_error: true,
            error_message: Some(NOT_FOUND_MESSAGE.to_string()),
            source: GuessSource::Guess,
        }
    }

    /// Finite rank of a valid entry
    #[inline]
    #[must_use]
    pub fn revealed_rank(&self) -> Option<u32> {
        if self.is_error { None } else { self.rank.value() }
    }

    #[inline]
    #[must_use]
    pub fn is_secret(&self) -> bool {
        !self.is_error && self.rank.is_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_entry() {
        let entry = GuessEntry::ranked("кава", 12, GuessSource::Guess);
        assert_eq!(entry.revealed_rank(), Some(12));
        assert!(!entry.is_error);
        assert!(!entry.is_secret());
    }

    #[test]
    fn not_found_entry() {
        let entry = GuessEntry::not_found("ххх");
        assert!(entry.is_error);
        assert_eq!(entry.rank, Rank::Infinite);
        assert_eq!(entry.revealed_rank(), None);
        assert_eq!(entry.error_message.as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn secret_entry() {
        assert!(GuessEntry::ranked("кіт", 1, GuessSource::Hint).is_secret());
    }
}
