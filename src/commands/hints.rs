//! Hint sequence preview
//!
//! Replays hint requests against a throwaway session so the sequence a player
//! would see can be inspected without touching saved progress.

use crate::core::{GameKey, Ranking};
use crate::game::{GameError, GameSession, GuessEntry, GuessRejection};
use crate::solver::SearchDirection;

/// One revealed hint
#[derive(Debug, Clone, PartialEq)]
pub struct HintStep {
    pub entry: GuessEntry,
    /// Direction stored after this hint
    pub direction: SearchDirection,
}

/// Result of a hint preview
#[derive(Debug, Clone, Default)]
pub struct HintPreview {
    /// Seed guesses that were accepted
    pub seeded: Vec<GuessEntry>,
    /// Seed guesses that were refused, with the reason
    pub rejected: Vec<(String, GuessRejection)>,
    pub steps: Vec<HintStep>,
    /// True when the planner ran out before `limit` hints
    pub exhausted: bool,
}

/// Play `seeds` as guesses, then request up to `limit` hints
///
/// # Errors
///
/// Returns `GameError::MissingRank` if the ranking has a gap where a hint
/// lands.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rankword::commands::preview_hints;
/// use rankword::core::{GameKey, Ranking};
///
/// let words: Vec<String> = (1..=1000).map(|i| format!("w{i}")).collect();
/// let ranking = Ranking::from_ordered_words(words).unwrap();
/// let key = GameKey::Archive(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
///
/// let preview = preview_hints(key, &ranking, &[], 4).unwrap();
/// let ranks: Vec<_> = preview.steps.iter().filter_map(|s| s.entry.rank.value()).collect();
/// assert_eq!(ranks, vec![500, 250, 125, 62]);
/// ```
pub fn preview_hints(
    key: GameKey,
    ranking: &Ranking,
    seeds: &[String],
    limit: usize,
) -> Result<HintPreview, GameError> {
    let mut session = GameSession::new(key);
    let mut preview = HintPreview::default();

    for seed in seeds {
        match session.submit_guess(seed, ranking, None) {
            Ok(entry) => preview.seeded.push(entry),
            Err(reason) => preview.rejected.push((seed.clone(), reason)),
        }
    }

    while preview.steps.len() < limit {
        let Some(entry) = session.request_hint(ranking)? else {
            preview.exhausted = true;
            break;
        };
        preview.steps.push(HintStep {
            entry,
            direction: session.direction(),
        });
    }

    Ok(preview)
}
