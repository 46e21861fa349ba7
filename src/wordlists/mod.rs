//! Rankings and word lists on disk
//!
//! Loads per-game ranking files and the optional allow-list. Nothing here
//! holds game state.

mod loader;

pub use loader::{
    LoadError, LoadedRanking, RankingSource, allowed_from_str, load_allowed_words, load_ranking,
    parse_ranking, word_lines,
};
