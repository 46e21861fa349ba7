//! Rankword
//!
//! A semantic word-ranking guessing game. Every word of a game is ranked by
//! similarity to a hidden secret word (rank 1); players guess words, see their
//! ranks, request hints that reveal ever closer words, or give up.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rankword::core::{GameKey, Rank, Ranking};
//! use rankword::game::GameSession;
//!
//! let ranking = Ranking::from_ordered_words(["ocean", "sea", "wave", "tide"]).unwrap();
//! let key = GameKey::Archive(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
//! let mut session = GameSession::new(key);
//!
//! let entry = session.submit_guess("Tide", &ranking, None).unwrap();
//! assert_eq!(entry.rank, Rank::Ranked(4));
//!
//! let hint = session.request_hint(&ranking).unwrap().unwrap();
//! assert_eq!(hint.word, "sea");
//! ```

// Core domain types
pub mod core;

// Hint planning
pub mod solver;

// Per-game state machine and snapshots
pub mod game;

// Snapshot persistence
pub mod storage;

// Ranking and word list files
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
