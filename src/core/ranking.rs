//! A game's ranking: every known word paired with its similarity rank
//!
//! Rankings are produced by the external ranking engine and handed to the game
//! already resolved. They are immutable once built.

use super::word::normalize;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One word of a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub rank: u32,
    /// Cosine similarity reported by the ranking engine, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl RankedEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, rank: u32) -> Self {
        Self {
            word: word.into(),
            rank,
            similarity: None,
        }
    }
}

/// Reasons a list of entries cannot form a ranking
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("word {word:?} has rank 0; ranks start at 1")]
    ZeroRank { word: String },
    #[error("entry with rank {rank} has an empty word")]
    EmptyWord { rank: u32 },
    #[error("rank {rank} is assigned to both {first:?} and {second:?}")]
    DuplicateRank {
        rank: u32,
        first: String,
        second: String,
    },
    #[error("word {word:?} appears more than once")]
    DuplicateWord { word: String },
}

/// Word-to-rank mapping for a single game
///
/// Entries are kept sorted by rank; word lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
    by_word: FxHashMap<String, usize>,
}

impl Ranking {
    /// Build a ranking from entries in any order
    ///
    /// # Errors
    ///
    /// Returns `RankingError` if a rank is 0, a word is empty, or a rank or a
    /// (normalized) word occurs twice. Gaps in the rank sequence are allowed
    /// here; see [`Ranking::missing_ranks`].
    pub fn new(mut entries: Vec<RankedEntry>) -> Result<Self, RankingError> {
        entries.sort_by_key(|entry| entry.rank);

        for pair in entries.windows(2) {
            if pair[0].rank == pair[1].rank {
                return Err(RankingError::DuplicateRank {
                    rank: pair[0].rank,
                    first: pair[0].word.clone(),
                    second: pair[1].word.clone(),
                });
            }
        }

        let mut by_word = FxHashMap::default();
        by_word.reserve(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.rank == 0 {
                return Err(RankingError::ZeroRank {
                    word: entry.word.clone(),
                });
            }

            let key = normalize(&entry.word);
            if key.is_empty() {
                return Err(RankingError::EmptyWord { rank: entry.rank });
            }

            if by_word.insert(key.clone(), index).is_some() {
                return Err(RankingError::DuplicateWord { word: key });
            }
        }

        Ok(Self { entries, by_word })
    }

    /// Build a dense ranking from words already in rank order (first word = rank 1)
    ///
    /// # Errors
    ///
    /// Returns `RankingError` if a word is empty or repeated.
    ///
    /// # Examples
    /// ```
    /// use rankword::core::Ranking;
    ///
    /// let ranking = Ranking::from_ordered_words(["сонце", "світло", "зоря"]).unwrap();
    /// assert_eq!(ranking.rank_of("Світло"), Some(2));
    /// assert_eq!(ranking.word_at(3), Some("зоря"));
    /// ```
    pub fn from_ordered_words<I, W>(words: I) -> Result<Self, RankingError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let entries = words
            .into_iter()
            .zip(1..)
            .map(|(word, rank)| RankedEntry::new(word, rank))
            .collect();
        Self::new(entries)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest rank a hint may reveal: the number of ranked words
    #[inline]
    #[must_use]
    pub fn max_rank(&self) -> u32 {
        u32::try_from(self.entries.len()).unwrap_or(u32::MAX)
    }

    /// Look up a word's rank (case-insensitive)
    #[must_use]
    pub fn rank_of(&self, word: &str) -> Option<u32> {
        self.by_word
            .get(&normalize(word))
            .map(|&index| self.entries[index].rank)
    }

    /// Look up the entry holding a given rank
    #[must_use]
    pub fn entry_at(&self, rank: u32) -> Option<&RankedEntry> {
        self.entries
            .binary_search_by_key(&rank, |entry| entry.rank)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Look up the word holding a given rank
    #[must_use]
    pub fn word_at(&self, rank: u32) -> Option<&str> {
        self.entry_at(rank).map(|entry| entry.word.as_str())
    }

    /// The secret word (rank 1), if the ranking contains it
    #[must_use]
    pub fn secret_word(&self) -> Option<&str> {
        self.word_at(1)
    }

    /// Entry with the lowest rank present
    #[must_use]
    pub fn lowest_entry(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    /// All entries in ascending rank order
    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// The `limit` closest words, ascending by rank
    ///
    /// The returned iterator is lazy and `Clone`, so callers can walk it more
    /// than once without touching the ranking again.
    pub fn closest(
        &self,
        limit: usize,
    ) -> impl ExactSizeIterator<Item = &RankedEntry> + Clone + '_ {
        self.entries.iter().take(limit)
    }

    /// Ranks below the highest held rank that no entry holds
    #[must_use]
    pub fn missing_ranks(&self) -> Vec<u32> {
        let highest = self.entries.last().map_or(0, |entry| entry.rank);
        (1..=highest)
            .filter(|&rank| self.entry_at(rank).is_none())
            .collect()
    }

    /// True when ranks run exactly `1..=max_rank` with no gaps
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.entries
            .iter()
            .zip(1..)
            .all(|(entry, expected)| entry.rank == expected)
    }
}
