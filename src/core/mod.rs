//! Core domain types for the ranking game
//!
//! Words, ranks, rankings and game keys. Everything here is pure data with
//! no I/O and no game state.

mod allowed;
mod game_key;
mod rank;
mod ranking;
mod word;

pub use allowed::AllowedWords;
pub use game_key::{BASE_DATE, CUSTOM_ID_LEN, GameKey, GameKeyError};
pub use rank::Rank;
pub use ranking::{RankedEntry, Ranking, RankingError};
pub use word::{Word, WordError, normalize};
