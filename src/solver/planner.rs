//! Hint rank selection
//!
//! Hints first descend from the best rank by repeated halving until they reach
//! rank 2, then ascend one rank at a time above the best rank. The sequence is
//! fully determined by the best rank, the ranks already revealed and the
//! current direction, so identical histories always yield identical hints.

use crate::core::Rank;
use rustc_hash::FxHashSet;

/// Which way the hint search is currently moving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    /// Halving toward rank 2
    #[default]
    Descending,
    /// Scanning upward from the best rank
    Ascending,
}

impl SearchDirection {
    #[inline]
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Outcome of a planning step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPlan {
    /// Rank to reveal, or `None` when no hint is available
    pub rank: Option<u32>,
    /// Direction the caller must store for the next request
    pub direction: SearchDirection,
}

/// Picks the next rank to reveal as a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintPlanner {
    /// Rank offered before anything has been revealed
    pub opening_rank: u32,
}

impl HintPlanner {
    /// Opening hint used by the daily game
    pub const OPENING_RANK: u32 = 500;

    #[must_use]
    pub const fn new(opening_rank: u32) -> Self {
        Self { opening_rank }
    }

    /// Compute the next hint rank
    ///
    /// # Parameters
    /// - `best`: lowest rank revealed so far, `Rank::Infinite` if none
    /// - `revealed`: every rank already shown by guesses or hints
    /// - `max_rank`: highest rank in the ranking (0 for an empty ranking)
    /// - `direction`: direction stored from the previous request
    ///
    /// Never fails; returns `rank: None` when there is nothing left to offer.
    ///
    /// # Examples
    /// ```
    /// use rankword::core::Rank;
    /// use rankword::solver::{HintPlanner, SearchDirection};
    /// use rustc_hash::FxHashSet;
    ///
    /// let planner = HintPlanner::default();
    /// let plan = planner.next_hint(
    ///     Rank::Ranked(8),
    ///     &FxHashSet::default(),
    ///     1000,
    ///     SearchDirection::Descending,
    /// );
    /// assert_eq!(plan.rank, Some(4));
    /// ```
    #[must_use]
    pub fn next_hint(
        &self,
        best: Rank,
        revealed: &FxHashSet<u32>,
        max_rank: u32,
        direction: SearchDirection,
    ) -> HintPlan {
        let none = |direction| HintPlan {
            rank: None,
            direction,
        };

        if max_rank == 0 {
            return none(direction);
        }

        let Rank::Ranked(best) = best else {
            let rank = (self.opening_rank <= max_rank).then_some(self.opening_rank);
            return HintPlan { rank, direction };
        };

        if best <= 1 {
            return none(direction);
        }

        let mut direction = direction;

        if direction == SearchDirection::Descending {
            if best > 2 {
                let mut candidate = best / 2;
                while candidate >= 2 {
                    if !revealed.contains(&candidate) {
                        return HintPlan {
                            rank: Some(candidate),
                            direction,
                        };
                    }
                    candidate /= 2;
                }

                if !revealed.contains(&2) {
                    return HintPlan {
                        rank: Some(2),
                        direction,
                    };
                }

                direction = SearchDirection::Ascending;
            } else {
                // best == 2
                direction = SearchDirection::Ascending;
            }
        }

        let rank = (best.saturating_add(1)..=max_rank).find(|rank| !revealed.contains(rank));
        HintPlan { rank, direction }
    }
}

impl Default for HintPlanner {
    fn default() -> Self {
        Self::new(Self::OPENING_RANK)
    }
}
