//! Game session state machine
//!
//! A `GameSession` owns everything that changes while one game is played:
//! the guess and hint lists, counters, best rank, hint direction and outcome.
//! It never loads rankings itself; every operation receives the already
//! resolved ranking for its game.
//!
//! ```text
//! Active ──submit_guess(rank 1)──→ Won
//! Active ──request_hint(rank 1)──→ Won
//! Active ──give_up──────────────→ GaveUp
//! ```
//!
//! `Won` and `GaveUp` are terminal: every mutating call becomes a no-op.

use super::entry::{GuessEntry, GuessSource};
use super::error::{GameError, GuessRejection};
use crate::core::{AllowedWords, GameKey, Rank, RankedEntry, Ranking, normalize};
use crate::solver::{HintPlanner, SearchDirection};
use rustc_hash::FxHashSet;

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[default]
    Active,
    Won,
    GaveUp,
}

impl Outcome {
    #[inline]
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Mutable state of one game, addressed by its [`GameKey`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    key: GameKey,
    pub(super) guesses: Vec<GuessEntry>,
    pub(super) hints: Vec<GuessEntry>,
    pub(super) best_rank: Rank,
    pub(super) guess_count: u32,
    pub(super) hint_count: u32,
    pub(super) direction: SearchDirection,
    pub(super) outcome: Outcome,
    pub(super) secret_word: Option<String>,
    pub(super) last_word: Option<String>,
    planner: HintPlanner,
}

impl GameSession {
    /// A fresh, active game
    #[must_use]
    pub fn new(key: GameKey) -> Self {
        Self {
            key,
            guesses: Vec::new(),
            hints: Vec::new(),
            best_rank: Rank::Infinite,
            guess_count: 0,
            hint_count: 0,
            direction: SearchDirection::Descending,
            outcome: Outcome::Active,
            secret_word: None,
            last_word: None,
            planner: HintPlanner::default(),
        }
    }

    /// Use a planner with a different opening rank
    #[must_use]
    pub fn with_planner(mut self, planner: HintPlanner) -> Self {
        self.planner = planner;
        self
    }

    #[must_use]
    pub const fn key(&self) -> &GameKey {
        &self.key
    }

    /// Player guesses in insertion order, including the give-up entry
    #[must_use]
    pub fn guesses(&self) -> &[GuessEntry] {
        &self.guesses
    }

    /// Hints in insertion order
    #[must_use]
    pub fn hints(&self) -> &[GuessEntry] {
        &self.hints
    }

    #[must_use]
    pub const fn best_rank(&self) -> Rank {
        self.best_rank
    }

    #[must_use]
    pub const fn guess_count(&self) -> u32 {
        self.guess_count
    }

    #[must_use]
    pub const fn hint_count(&self) -> u32 {
        self.hint_count
    }

    #[must_use]
    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.outcome, Outcome::Active)
    }

    /// The secret word, once the game is won or given up
    #[must_use]
    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    /// Word of the most recent guess, hint or give-up
    #[must_use]
    pub fn last_word(&self) -> Option<&str> {
        self.last_word.as_deref()
    }

    /// Submit a player guess
    ///
    /// The word is trimmed and lowercased before any check. Words missing from
    /// the ranking are recorded as error entries and still count as guesses.
    ///
    /// # Errors
    ///
    /// Returns a `GuessRejection`, leaving the session untouched, when the game
    /// is over, the ranking is empty, the word is empty or already guessed, or
    /// a loaded allow-list does not contain it.
    pub fn submit_guess(
        &mut self,
        raw_word: &str,
        ranking: &Ranking,
        allowed: Option<&AllowedWords>,
    ) -> Result<GuessEntry, GuessRejection> {
        if !self.is_active() {
            return Err(GuessRejection::GameOver);
        }

        if ranking.is_empty() {
            return Err(GuessRejection::RankingUnavailable);
        }

        let word = normalize(raw_word);
        if word.is_empty() {
            return Err(GuessRejection::Empty);
        }

        if self.guesses.iter().any(|g| normalize(&g.word) == word) {
            return Err(GuessRejection::Duplicate(word));
        }

        if let Some(allowed) = allowed
            && allowed.is_loaded()
            && !allowed.contains(&word)
        {
            return Err(GuessRejection::NotAllowed(word));
        }

        let entry = match ranking.rank_of(&word) {
            Some(rank) => GuessEntry::ranked(word, rank, GuessSource::Guess),
            None => GuessEntry::not_found(word),
        };

        self.guess_count += 1;
        tracing::debug!(
            key = %self.key,
            word = %entry.word,
            rank = %entry.rank,
            guess_count = self.guess_count,
            "guess recorded"
        );

        self.record(entry.clone(), false);
        Ok(entry)
    }

    /// Reveal the next hint chosen by the planner
    ///
    /// Returns `Ok(None)` when the game is over, the ranking is empty or the
    /// planner has nothing left to offer. The updated search direction is
    /// stored even when no hint results.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MissingRank` if the ranking has a gap at the rank
    /// the planner selected.
    pub fn request_hint(&mut self, ranking: &Ranking) -> Result<Option<GuessEntry>, GameError> {
        if !self.is_active() || ranking.is_empty() {
            return Ok(None);
        }

        let max_rank = ranking.max_rank();
        let plan = self.planner.next_hint(
            self.best_rank,
            &self.revealed_ranks(),
            max_rank,
            self.direction,
        );
        self.direction = plan.direction;

        let Some(rank) = plan.rank else {
            tracing::debug!(key = %self.key, "no hint available");
            return Ok(None);
        };

        let word = ranking
            .word_at(rank)
            .ok_or(GameError::MissingRank { rank, max_rank })?;

        let entry = GuessEntry::ranked(word, rank, GuessSource::Hint);
        self.hint_count += 1;
        tracing::debug!(
            key = %self.key,
            word = %entry.word,
            rank,
            direction = ?self.direction,
            "hint revealed"
        );

        self.record(entry.clone(), true);
        Ok(Some(entry))
    }

    /// Give up and reveal the secret word
    ///
    /// The secret is the rank-1 word, or the lowest-ranked entry if the
    /// ranking lacks rank 1. Giving up does not count as a guess. Returns
    /// `None` when the game is already over or the ranking is empty.
    pub fn give_up(&mut self, ranking: &Ranking) -> Option<GuessEntry> {
        if !self.is_active() {
            return None;
        }

        let secret = ranking
            .secret_word()
            .or_else(|| ranking.lowest_entry().map(|e| e.word.as_str()))?;

        let entry = GuessEntry::ranked(secret, 1, GuessSource::GiveUp);
        tracing::debug!(key = %self.key, secret = %entry.word, "player gave up");

        self.best_rank = Rank::SECRET;
        self.outcome = Outcome::GaveUp;
        self.secret_word = Some(entry.word.clone());
        self.last_word = Some(entry.word.clone());
        self.guesses.push(entry.clone());
        Some(entry)
    }

    /// Ranks shown so far by guesses and hints
    #[must_use]
    pub fn revealed_ranks(&self) -> FxHashSet<u32> {
        self.guesses
            .iter()
            .chain(&self.hints)
            .filter_map(GuessEntry::revealed_rank)
            .collect()
    }

    /// Guesses and hints in display order: errors first, then ascending rank
    ///
    /// Ties keep insertion order. The underlying lists are never reordered.
    #[must_use]
    pub fn sorted_view(&self) -> Vec<&GuessEntry> {
        let mut view: Vec<&GuessEntry> = self.guesses.iter().chain(&self.hints).collect();
        view.sort_by_key(|entry| (!entry.is_error, entry.rank));
        view
    }

    /// The entry matching the last word, if it was a valid reveal
    #[must_use]
    pub fn latest_entry(&self) -> Option<&GuessEntry> {
        let last = self.last_word.as_deref()?;
        self.guesses
            .iter()
            .chain(&self.hints)
            .rev()
            .find(|entry| !entry.is_error && entry.word == last)
    }

    /// The `limit` closest words of a ranking, ascending by rank
    ///
    /// A pure projection over the ranking; the session is not consulted.
    pub fn ranked_entries_view(
        ranking: &Ranking,
        limit: usize,
    ) -> impl ExactSizeIterator<Item = &RankedEntry> + Clone + '_ {
        ranking.closest(limit)
    }

    fn record(&mut self, entry: GuessEntry, is_hint: bool) {
        self.best_rank = self.best_rank.min(entry.rank);
        self.last_word = Some(entry.word.clone());

        if entry.is_secret() {
            tracing::info!(key = %self.key, secret = %entry.word, "secret word found");
            self.outcome = Outcome::Won;
            self.secret_word = Some(entry.word.clone());
        }

        if is_hint {
            self.hints.push(entry);
        } else {
            self.guesses.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key() -> GameKey {
        GameKey::Daily(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap())
    }

    /// 1000 words where "w{n}" holds rank n
    fn ranking() -> Ranking {
        Ranking::from_ordered_words((1..=1000).map(|n| format!("w{n}"))).unwrap()
    }

    #[test]
    fn new_session_is_fresh() {
        let session = GameSession::new(key());
        assert_eq!(session.outcome(), Outcome::Active);
        assert_eq!(session.best_rank(), Rank::Infinite);
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.hint_count(), 0);
        assert_eq!(session.direction(), SearchDirection::Descending);
        assert!(session.guesses().is_empty());
        assert!(session.secret_word().is_none());
    }

    #[test]
    fn guess_records_rank_and_normalizes() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        let entry = session.submit_guess("  W42 ", &ranking, None).unwrap();
        assert_eq!(entry.word, "w42");
        assert_eq!(entry.rank, Rank::Ranked(42));
        assert_eq!(entry.source, GuessSource::Guess);
        assert_eq!(session.best_rank(), Rank::Ranked(42));
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.last_word(), Some("w42"));
    }

    #[test]
    fn best_rank_is_running_minimum() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        let mut expected = Rank::Infinite;

        for word in ["w700", "w300", "w900", "nope", "w12", "w50"] {
            let previous = session.best_rank();
            let entry = session.submit_guess(word, &ranking, None).unwrap();
            expected = expected.min(entry.rank);
            assert_eq!(session.best_rank(), expected);
            assert!(session.best_rank() <= previous);
        }
        assert_eq!(session.best_rank(), Rank::Ranked(12));
    }

    #[test]
    fn unknown_word_is_an_error_entry() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        let entry = session.submit_guess("xyz", &ranking, None).unwrap();
        assert!(entry.is_error);
        assert_eq!(entry.rank, Rank::Infinite);
        assert!(entry.error_message.is_some());
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.best_rank(), Rank::Infinite);
    }

    #[test]
    fn duplicate_guess_is_rejected() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        session.submit_guess("w10", &ranking, None).unwrap();
        let before = session.clone();

        assert_eq!(
            session.submit_guess(" W10", &ranking, None),
            Err(GuessRejection::Duplicate("w10".to_string()))
        );
        assert_eq!(session, before);
        assert_eq!(session.guess_count(), 1);
    }

    #[test]
    fn duplicate_error_guess_is_rejected() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        session.submit_guess("zzz", &ranking, None).unwrap();
        assert!(matches!(
            session.submit_guess("ZZZ", &ranking, None),
            Err(GuessRejection::Duplicate(_))
        ));
        assert_eq!(session.guess_count(), 1);
    }

    #[test]
    fn empty_guess_is_rejected() {
        let mut session = GameSession::new(key());
        assert_eq!(
            session.submit_guess("   ", &ranking(), None),
            Err(GuessRejection::Empty)
        );
        assert_eq!(session.guess_count(), 0);
    }

    #[test]
    fn allow_list_filters_guesses() {
        let ranking = ranking();
        let allowed: AllowedWords = ["w5", "w6", "other"].into_iter().collect();
        let mut session = GameSession::new(key());

        assert_eq!(
            session.submit_guess("w7", &ranking, Some(&allowed)),
            Err(GuessRejection::NotAllowed("w7".to_string()))
        );
        assert_eq!(session.guess_count(), 0);

        let entry = session.submit_guess("other", &ranking, Some(&allowed)).unwrap();
        assert!(entry.is_error);
        assert!(session.submit_guess("W5", &ranking, Some(&allowed)).is_ok());
    }

    #[test]
    fn empty_allow_list_is_ignored() {
        let mut session = GameSession::new(key());
        let allowed = AllowedWords::new();
        assert!(session.submit_guess("w7", &ranking(), Some(&allowed)).is_ok());
    }

    #[test]
    fn empty_ranking_refuses_play() {
        let empty = Ranking::default();
        let mut session = GameSession::new(key());

        assert_eq!(
            session.submit_guess("w1", &empty, None),
            Err(GuessRejection::RankingUnavailable)
        );
        assert_eq!(session.request_hint(&empty), Ok(None));
        assert_eq!(session.give_up(&empty), None);
        assert_eq!(session, GameSession::new(key()));
    }

    #[test]
    fn winning_guess_ends_game() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        session.submit_guess("w3", &ranking, None).unwrap();
        let entry = session.submit_guess("W1", &ranking, None).unwrap();

        assert!(entry.is_secret());
        assert_eq!(session.outcome(), Outcome::Won);
        assert_eq!(session.secret_word(), Some("w1"));
        assert_eq!(session.best_rank(), Rank::SECRET);
        assert_eq!(session.guess_count(), 2);
    }

    #[test]
    fn finished_game_ignores_mutations() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        session.submit_guess("w1", &ranking, None).unwrap();
        let won = session.clone();

        assert_eq!(
            session.submit_guess("w2", &ranking, None),
            Err(GuessRejection::GameOver)
        );
        assert_eq!(session.request_hint(&ranking), Ok(None));
        assert_eq!(session.give_up(&ranking), None);
        assert_eq!(session, won);
    }

    #[test]
    fn first_hint_is_rank_500() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        let hint = session.request_hint(&ranking).unwrap().unwrap();
        assert_eq!(hint.rank, Rank::Ranked(500));
        assert_eq!(hint.word, "w500");
        assert_eq!(hint.source, GuessSource::Hint);
        assert_eq!(session.hint_count(), 1);
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.best_rank(), Rank::Ranked(500));
        assert_eq!(session.hints().len(), 1);
        assert!(session.guesses().is_empty());
    }

    #[test]
    fn small_ranking_has_no_opening_hint() {
        let ranking = Ranking::from_ordered_words(["a", "b", "c"]).unwrap();
        let mut session = GameSession::new(key());
        assert_eq!(session.request_hint(&ranking), Ok(None));
        assert_eq!(session.hint_count(), 0);
    }

    #[test]
    fn hints_never_repeat_revealed_ranks() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        for word in ["w250", "w62", "w3", "w4"] {
            session.submit_guess(word, &ranking, None).unwrap();
        }

        for _ in 0..30 {
            let revealed = session.revealed_ranks();
            let hint = session.request_hint(&ranking).unwrap().unwrap();
            let rank = hint.rank.value().unwrap();
            assert!(!revealed.contains(&rank), "rank {rank} revealed twice");
        }
        assert_eq!(session.hint_count(), 30);
        assert_eq!(session.guess_count(), 4);
    }

    #[test]
    fn hints_run_out_on_small_ranking() {
        let ranking = Ranking::from_ordered_words(["a", "b", "c", "d"]).unwrap();
        let mut session = GameSession::new(key());
        session.submit_guess("d", &ranking, None).unwrap();

        // 4 -> 2, then ascending: 3; rank 4 is already revealed
        let ranks: Vec<Rank> = std::iter::from_fn(|| session.request_hint(&ranking).unwrap())
            .map(|entry| entry.rank)
            .collect();
        assert_eq!(ranks, vec![Rank::Ranked(2), Rank::Ranked(3)]);
        assert_eq!(session.direction(), SearchDirection::Ascending);
        assert_eq!(session.request_hint(&ranking), Ok(None));
        assert!(session.is_active());
    }

    #[test]
    fn gap_in_ranking_is_reported() {
        let ranking = Ranking::new(vec![
            RankedEntry::new("a", 1),
            RankedEntry::new("b", 2),
            RankedEntry::new("d", 8),
        ])
        .unwrap();
        let mut session = GameSession::new(key());
        session.submit_guess("b", &ranking, None).unwrap();

        // best 2 -> ascend to 3, which is missing
        assert_eq!(
            session.request_hint(&ranking),
            Err(GameError::MissingRank {
                rank: 3,
                max_rank: 3
            })
        );
        assert_eq!(session.hint_count(), 0);
    }

    #[test]
    fn hint_of_rank_one_wins() {
        let ranking = ranking();
        let mut session = GameSession::new(key()).with_planner(HintPlanner::new(1));

        let hint = session.request_hint(&ranking).unwrap().unwrap();
        assert!(hint.is_secret());
        assert_eq!(session.outcome(), Outcome::Won);
        assert_eq!(session.secret_word(), Some("w1"));
    }

    #[test]
    fn give_up_reveals_secret_without_counting() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        let entry = session.give_up(&ranking).unwrap();
        assert_eq!(entry.word, "w1");
        assert_eq!(entry.rank, Rank::SECRET);
        assert_eq!(entry.source, GuessSource::GiveUp);

        assert_eq!(session.outcome(), Outcome::GaveUp);
        assert_eq!(session.guess_count(), 0);
        assert_eq!(session.guesses().len(), 1);
        assert_eq!(session.best_rank(), Rank::SECRET);
        assert_eq!(session.secret_word(), Some("w1"));
    }

    #[test]
    fn give_up_after_guesses_keeps_count() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        session.submit_guess("w20", &ranking, None).unwrap();
        session.request_hint(&ranking).unwrap();

        session.give_up(&ranking).unwrap();
        assert_eq!(session.guess_count(), 1);
        assert_eq!(session.hint_count(), 1);
        assert_eq!(session.give_up(&ranking), None);
    }

    #[test]
    fn give_up_falls_back_to_lowest_rank() {
        let ranking =
            Ranking::new(vec![RankedEntry::new("b", 3), RankedEntry::new("a", 2)]).unwrap();
        let mut session = GameSession::new(key());

        let entry = session.give_up(&ranking).unwrap();
        assert_eq!(entry.word, "a");
        assert_eq!(entry.rank, Rank::SECRET);
    }

    #[test]
    fn scenario_guess_hint_win() {
        let ranking = ranking();
        let mut session = GameSession::new(key());

        session.submit_guess("w500", &ranking, None).unwrap();
        assert_eq!(session.best_rank(), Rank::Ranked(500));
        assert!(session.is_active());

        let hint = session.request_hint(&ranking).unwrap().unwrap();
        assert_eq!(hint.rank, Rank::Ranked(250));

        session.submit_guess("w1", &ranking, None).unwrap();
        assert_eq!(session.outcome(), Outcome::Won);
        assert_eq!(session.secret_word(), Some("w1"));

        let after = session.clone();
        assert!(session.submit_guess("w2", &ranking, None).is_err());
        assert_eq!(session, after);
    }

    #[test]
    fn secret_present_only_when_finished() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        let has_secret =
            |s: &GameSession| s.guesses().iter().chain(s.hints()).any(GuessEntry::is_secret);

        for word in ["w10", "w5", "nope"] {
            session.submit_guess(word, &ranking, None).unwrap();
            session.request_hint(&ranking).unwrap();
            assert_eq!(has_secret(&session), session.outcome().is_finished());
        }

        session.give_up(&ranking);
        assert!(has_secret(&session));
        assert!(session.outcome().is_finished());
    }

    #[test]
    fn sorted_view_puts_errors_first() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        for word in ["w30", "bad1", "w7", "bad2"] {
            session.submit_guess(word, &ranking, None).unwrap();
        }
        session.request_hint(&ranking).unwrap(); // rank 3

        let words: Vec<&str> = session.sorted_view().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["bad1", "bad2", "w3", "w7", "w30"]);

        // insertion order is untouched
        let inserted: Vec<&str> = session.guesses().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(inserted, vec!["w30", "bad1", "w7", "bad2"]);
    }

    #[test]
    fn latest_entry_skips_errors() {
        let ranking = ranking();
        let mut session = GameSession::new(key());
        session.submit_guess("w9", &ranking, None).unwrap();
        assert_eq!(session.latest_entry().map(|e| e.rank), Some(Rank::Ranked(9)));

        session.submit_guess("bad", &ranking, None).unwrap();
        assert!(session.latest_entry().is_none());

        let hint = session.request_hint(&ranking).unwrap().unwrap();
        assert_eq!(session.latest_entry(), Some(&hint));
    }

    #[test]
    fn ranked_entries_view_is_top_n() {
        let ranking = ranking();
        let view = GameSession::ranked_entries_view(&ranking, 500);
        assert_eq!(view.len(), 500);
        let ranks: Vec<u32> = view.clone().map(|e| e.rank).collect();
        assert_eq!(ranks.first(), Some(&1));
        assert_eq!(ranks.last(), Some(&500));
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(view.count(), 500);
    }
}
