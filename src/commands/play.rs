//! Interactive play mode
//!
//! Line-based game loop: plain words are guesses, slash commands request
//! hints, give up, list the closest words or switch games. Progress is saved
//! after every change.

use crate::core::{AllowedWords, GameKey, Ranking};
use crate::game::{GameSession, GuessEntry, GuessRejection};
use crate::output::display;
use crate::storage::{SessionManager, SnapshotStore};
use crate::wordlists::RankingSource;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Closest words listed by `/top` and after the game ends
pub const CLOSEST_LIMIT: usize = 500;

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Guess(String),
    Hint,
    GiveUp,
    Top(usize),
    Open(GameKey),
    Reset,
    Help,
    Quit,
}

impl PlayCommand {
    /// Parse an input line
    ///
    /// # Errors
    ///
    /// Returns a message for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Self::Guess(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match name.as_str() {
            "hint" | "h" => Ok(Self::Hint),
            "giveup" | "give-up" => Ok(Self::GiveUp),
            "top" | "t" => arg
                .map_or(Ok(CLOSEST_LIMIT), str::parse)
                .map(Self::Top)
                .map_err(|_| "usage: /top [count]".to_string()),
            "open" | "o" => {
                let key = arg.ok_or_else(|| "usage: /open <date|today|custom:id>".to_string())?;
                key.parse().map(Self::Open).map_err(|e| format!("{e}"))
            }
            "reset" => Ok(Self::Reset),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command /{other}, try /help")),
        }
    }
}

/// What a command did, for the caller to display
#[derive(Debug, Clone, PartialEq)]
pub enum PlayEvent {
    Guessed(GuessEntry),
    Rejected(GuessRejection),
    Hint(GuessEntry),
    NoHint,
    GaveUp(GuessEntry),
    AlreadyOver,
    Top(usize),
    Opened(GameKey),
    Reset,
    Help,
    Quit,
}

/// An open game: saved session plus the ranking it is played against
pub struct Game<'a, S: SnapshotStore> {
    manager: SessionManager<S>,
    source: &'a RankingSource,
    allowed: Option<&'a AllowedWords>,
    ranking: Ranking,
}

impl<'a, S: SnapshotStore> Game<'a, S> {
    /// Load the ranking for `key` and restore its saved progress
    ///
    /// # Errors
    ///
    /// Returns an error if the ranking cannot be loaded or the store read.
    pub fn open(
        store: S,
        source: &'a RankingSource,
        allowed: Option<&'a AllowedWords>,
        key: GameKey,
    ) -> Result<Self> {
        let ranking = source.load(&key)?.ranking;
        let manager = SessionManager::open(store, key)?;
        Ok(Self {
            manager,
            source,
            allowed,
            ranking,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        self.manager.session()
    }

    #[must_use]
    pub const fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.manager.into_store()
    }

    /// Apply one command and persist the result
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails, the ranking has a gap where a hint
    /// lands, or `/open` names a game without a ranking. The open game is
    /// unchanged in the last case.
    pub fn apply(&mut self, command: PlayCommand) -> Result<PlayEvent> {
        let allowed = self.allowed;
        let ranking = &self.ranking;

        let event = match command {
            PlayCommand::Guess(word) => {
                match self
                    .manager
                    .update(|s| s.submit_guess(&word, ranking, allowed))?
                {
                    Ok(entry) => PlayEvent::Guessed(entry),
                    Err(reason) => PlayEvent::Rejected(reason),
                }
            }
            PlayCommand::Hint => match self.manager.update(|s| s.request_hint(ranking))?? {
                Some(entry) => PlayEvent::Hint(entry),
                None if self.session().is_active() => PlayEvent::NoHint,
                None => PlayEvent::AlreadyOver,
            },
            PlayCommand::GiveUp => match self.manager.update(|s| s.give_up(ranking))? {
                Some(entry) => PlayEvent::GaveUp(entry),
                None => PlayEvent::AlreadyOver,
            },
            PlayCommand::Top(limit) => PlayEvent::Top(limit),
            PlayCommand::Open(key) => {
                let next = self.source.load(&key)?.ranking;
                self.manager.switch_to(key.clone())?;
                self.ranking = next;
                PlayEvent::Opened(key)
            }
            PlayCommand::Reset => {
                self.manager.reset()?;
                PlayEvent::Reset
            }
            PlayCommand::Help => PlayEvent::Help,
            PlayCommand::Quit => PlayEvent::Quit,
        };

        Ok(event)
    }
}

/// Run the interactive loop on stdin until `/quit` or end of input
///
/// # Errors
///
/// Returns an error on I/O failure or if progress cannot be saved.
pub fn run_play<S: SnapshotStore>(game: &mut Game<'_, S>) -> Result<()> {
    display::print_game_header(game.session(), game.ranking());
    print_help();
    display::print_guesses(game.session(), game.ranking().max_rank());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".bright_cyan().bold());
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read input")?;

        let command = match PlayCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        let event = match game.apply(command) {
            Ok(event) => event,
            Err(e) => {
                println!("{} {e:#}", "❌".red());
                continue;
            }
        };

        if !show_event(game, &event) {
            break;
        }
    }

    println!("\n👋 Progress saved. See you tomorrow!\n");
    Ok(())
}

/// Print the effect of `event`; false means the loop should stop
fn show_event<S: SnapshotStore>(game: &Game<'_, S>, event: &PlayEvent) -> bool {
    let session = game.session();
    let max_rank = game.ranking().max_rank();

    match event {
        PlayEvent::Guessed(_) | PlayEvent::Hint(_) => {
            if let PlayEvent::Hint(entry) = event {
                println!("💡 Hint: {}", entry.word.bright_white().bold());
            }
            display::print_guesses(session, max_rank);
            if !session.is_active() {
                display::print_game_over(session);
                display::print_closest(game.ranking(), CLOSEST_LIMIT.min(20), max_rank);
            }
        }
        PlayEvent::Rejected(reason) => println!("{}", reason.to_string().yellow()),
        PlayEvent::NoHint => println!("{}", "No more hints for this game.".yellow()),
        PlayEvent::GaveUp(_) => {
            display::print_guesses(session, max_rank);
            display::print_game_over(session);
        }
        PlayEvent::AlreadyOver => display::print_game_over(session),
        PlayEvent::Top(limit) => {
            if session.is_active() {
                println!("{}", "The closest words are shown once the game is over.".yellow());
            } else {
                display::print_closest(game.ranking(), *limit, max_rank);
            }
        }
        PlayEvent::Opened(_) | PlayEvent::Reset => {
            display::print_game_header(session, game.ranking());
            display::print_guesses(session, max_rank);
        }
        PlayEvent::Help => print_help(),
        PlayEvent::Quit => return false,
    }

    true
}

fn print_help() {
    println!("Type a word to guess. Commands:");
    println!("  /hint           reveal a closer word");
    println!("  /giveup         reveal the secret word");
    println!("  /top [n]        closest words (after the game ends)");
    println!("  /open <key>     switch to a date, 'today' or custom:<id>");
    println!("  /reset          start this game over");
    println!("  /quit           save and exit\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rank;
    use crate::game::Outcome;
    use crate::storage::MemoryStore;
    use crate::storage::store::tests::scratch_dir;
    use chrono::NaiveDate;
    use std::fs;

    fn day(d: u32) -> GameKey {
        GameKey::Archive(NaiveDate::from_ymd_opt(2025, 6, d).unwrap())
    }

    fn write_ranking(dir: &std::path::Path, name: &str, words: &[&str]) {
        let entries: Vec<String> = words
            .iter()
            .enumerate()
            .map(|(i, w)| format!(r#"{{"word": "{w}", "rank": {}}}"#, i + 1))
            .collect();
        fs::write(dir.join(name), format!("[{}]", entries.join(","))).unwrap();
    }

    #[test]
    fn parse_commands() {
        assert_eq!(PlayCommand::parse("  Море "), Ok(PlayCommand::Guess("Море".into())));
        assert_eq!(PlayCommand::parse("/hint"), Ok(PlayCommand::Hint));
        assert_eq!(PlayCommand::parse("/H"), Ok(PlayCommand::Hint));
        assert_eq!(PlayCommand::parse("/giveup"), Ok(PlayCommand::GiveUp));
        assert_eq!(PlayCommand::parse("/top"), Ok(PlayCommand::Top(CLOSEST_LIMIT)));
        assert_eq!(PlayCommand::parse("/top 20"), Ok(PlayCommand::Top(20)));
        assert_eq!(PlayCommand::parse("/open 2025-06-03"), Ok(PlayCommand::Open(day(3))));
        assert_eq!(PlayCommand::parse("/quit"), Ok(PlayCommand::Quit));
        assert!(PlayCommand::parse("/top many").is_err());
        assert!(PlayCommand::parse("/open").is_err());
        assert!(PlayCommand::parse("/dance").is_err());
    }

    #[test]
    fn plays_and_switches_games() {
        let dir = scratch_dir("play");
        fs::create_dir_all(&dir).unwrap();
        write_ranking(&dir, "2025-06-02.json", &["море", "океан", "хвиля", "берег"]);
        write_ranking(&dir, "2025-06-03.json", &["ліс", "дерево"]);

        let source = RankingSource::new(&dir);
        let mut game = Game::open(MemoryStore::new(), &source, None, day(2)).unwrap();

        let event = game.apply(PlayCommand::Guess("Берег".into())).unwrap();
        assert!(matches!(event, PlayEvent::Guessed(ref e) if e.rank == Rank::Ranked(4)));

        let event = game.apply(PlayCommand::Guess("берег".into())).unwrap();
        assert!(matches!(event, PlayEvent::Rejected(GuessRejection::Duplicate(_))));

        let event = game.apply(PlayCommand::Hint).unwrap();
        assert!(matches!(event, PlayEvent::Hint(ref e) if e.word == "океан"));

        assert!(game.apply(PlayCommand::Open(day(9))).is_err());
        assert_eq!(game.session().key(), &day(2));

        let event = game.apply(PlayCommand::Open(day(3))).unwrap();
        assert_eq!(event, PlayEvent::Opened(day(3)));
        assert_eq!(game.ranking().len(), 2);

        let event = game.apply(PlayCommand::GiveUp).unwrap();
        assert!(matches!(event, PlayEvent::GaveUp(ref e) if e.word == "ліс"));
        assert_eq!(game.apply(PlayCommand::GiveUp).unwrap(), PlayEvent::AlreadyOver);
        assert_eq!(game.apply(PlayCommand::Hint).unwrap(), PlayEvent::AlreadyOver);

        game.apply(PlayCommand::Open(day(2))).unwrap();
        assert_eq!(game.session().guess_count(), 1);
        assert_eq!(game.session().hint_count(), 1);
        assert_eq!(game.session().best_rank(), Rank::Ranked(2));

        let event = game.apply(PlayCommand::Guess("море".into())).unwrap();
        assert!(matches!(event, PlayEvent::Guessed(ref e) if e.is_secret()));
        assert_eq!(game.session().outcome(), Outcome::Won);

        game.apply(PlayCommand::Reset).unwrap();
        assert!(game.session().is_active());
        assert_eq!(game.session().guess_count(), 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn allow_list_rejects_unknown_words() {
        let dir = scratch_dir("play-allowed");
        fs::create_dir_all(&dir).unwrap();
        write_ranking(&dir, "2025-06-02.json", &["море", "океан"]);

        let source = RankingSource::new(&dir);
        let allowed: AllowedWords = ["море", "океан", "гора"].into_iter().collect();
        let mut game = Game::open(MemoryStore::new(), &source, Some(&allowed), day(2)).unwrap();

        let event = game.apply(PlayCommand::Guess("qwerty".into())).unwrap();
        assert!(matches!(event, PlayEvent::Rejected(GuessRejection::NotAllowed(_))));
        assert_eq!(game.session().guess_count(), 0);

        let event = game.apply(PlayCommand::Guess("гора".into())).unwrap();
        assert!(matches!(event, PlayEvent::Guessed(ref e) if e.is_error));
        assert_eq!(game.session().guess_count(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_ranking_refuses_to_open() {
        let source = RankingSource::new(scratch_dir("play-missing"));
        assert!(Game::open(MemoryStore::new(), &source, None, day(2)).is_err());
    }
}
