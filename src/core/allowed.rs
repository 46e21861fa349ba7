//! Allowed-word filter
//!
//! An optional dictionary used to reject guesses before they reach the
//! ranking. Words outside it never become guess entries.

use super::word::normalize;
use rustc_hash::FxHashSet;

/// Case-insensitive set of words a player may guess
#[derive(Debug, Clone, Default)]
pub struct AllowedWords {
    words: FxHashSet<String>,
}

impl AllowedWords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words in the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A filter only takes part in validation once it holds at least one word
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        !word.is_empty() && self.words.insert(word)
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowedWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut allowed = Self::new();
        for word in iter {
            allowed.insert(word.as_ref());
        }
        allowed
    }
}
