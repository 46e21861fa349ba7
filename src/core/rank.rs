//! Rank values
//!
//! A rank is the position of a word in the secret word's similarity ordering.
//! Rank 1 is the secret itself. Words the ranking does not know carry an
//! infinite rank, which sorts after every finite one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A word's rank: finite (1-based) or infinite
///
/// Serialized as an integer, with `null` standing in for infinity.
///
/// # Examples
/// ```
/// use rankword::core::Rank;
///
/// assert!(Rank::Ranked(3) < Rank::Ranked(10));
/// assert!(Rank::Ranked(10_000) < Rank::Infinite);
/// assert_eq!(Rank::Ranked(3).min(Rank::Infinite), Rank::Ranked(3));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum Rank {
    /// A finite rank, always >= 1 for entries produced by the game
    Ranked(u32),
    /// No rank: either nothing revealed yet or a word outside the ranking
    #[default]
    Infinite,
}

impl Rank {
    /// The secret word's rank
    pub const SECRET: Self = Self::Ranked(1);

    /// The finite value, if any
    #[inline]
    #[must_use]
    pub const fn value(self) -> Option<u32> {
        match self {
            Self::Ranked(value) => Some(value),
            Self::Infinite => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Ranked(_))
    }

    /// True for rank 1
    #[inline]
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Ranked(1))
    }
}

impl From<u32> for Rank {
    fn from(value: u32) -> Self {
        Self::Ranked(value)
    }
}

impl From<Option<u32>> for Rank {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Infinite, Self::Ranked)
    }
}

impl From<Rank> for Option<u32> {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranked(value) => write!(f, "{value}"),
            Self::Infinite => write!(f, "∞"),
        }
    }
}
