//! Guessable word representation
//!
//! A Word is the normalized (trimmed, lowercased) form of player input or a
//! ranking entry. Words are compared by their normalized text, so lookups are
//! case-insensitive everywhere in the crate.

use std::fmt;
use thiserror::Error;

/// A normalized vocabulary word
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word must be a single token, got {0:?}")]
    ContainsWhitespace(String),
}

/// Normalize raw input the way every lookup in the game does: trim, then lowercase
///
/// # Examples
/// ```
/// use rankword::core::normalize;
///
/// assert_eq!(normalize("  Кіт "), "кіт");
/// assert_eq!(normalize("CRANE"), "crane");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Word {
    /// Create a new Word from raw text
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The text is empty after trimming
    /// - The text contains inner whitespace
    ///
    /// # Examples
    /// ```
    /// use rankword::core::Word;
    ///
    /// let word = Word::new(" Сонце ").unwrap();
    /// assert_eq!(word.text(), "сонце");
    ///
    /// assert!(Word::new("   ").is_err());
    /// assert!(Word::new("two words").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = normalize(text.as_ref());

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if text.chars().any(char::is_whitespace) {
            return Err(WordError::ContainsWhitespace(text));
        }

        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the word, returning the normalized text
    #[inline]
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
