//! Game identifiers
//!
//! Every game is addressed by a key: today's daily game, an archived day, or a
//! custom game shared by id. The key decides where progress is stored and
//! which ranking is loaded; the game logic never interprets it otherwise.

use chrono::{Local, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date of game number 1
pub const BASE_DATE: (i32, u32, u32) = (2025, 6, 2);

/// Length of a custom game id (hex-encoded SHA-256)
pub const CUSTOM_ID_LEN: usize = 64;

const DATE_FORMAT: &str = "%Y-%m-%d";
const CUSTOM_PREFIX: &str = "custom";

/// Which game a session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Today's game
    Daily(NaiveDate),
    /// A past day's game opened from the archive
    Archive(NaiveDate),
    /// A game created from a chosen secret word, addressed by its content id
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameKeyError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid custom game id {0:?}, expected {CUSTOM_ID_LEN} hex characters")]
    InvalidGameId(String),
}

fn base_date() -> NaiveDate {
    let (year, month, day) = BASE_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl GameKey {
    /// The daily game for the local calendar date
    #[must_use]
    pub fn today() -> Self {
        Self::Daily(Local::now().date_naive())
    }

    /// A custom game key, validating the id
    ///
    /// # Errors
    ///
    /// Returns `GameKeyError::InvalidGameId` unless `id` is 64 hex characters.
    pub fn custom(id: &str) -> Result<Self, GameKeyError> {
        let id = id.trim().to_ascii_lowercase();
        if id.len() == CUSTOM_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self::Custom(id))
        } else {
            Err(GameKeyError::InvalidGameId(id))
        }
    }

    /// Calendar date for daily and archived games
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Daily(date) | Self::Archive(date) => Some(*date),
            Self::Custom(_) => None,
        }
    }

    /// Sequential game number counted from [`BASE_DATE`] (which is game 1)
    ///
    /// Custom games and dates before the base date have no number.
    #[must_use]
    pub fn game_number(&self) -> Option<u32> {
        let days = self.date()?.signed_duration_since(base_date()).num_days();
        u32::try_from(days).ok().map(|days| days + 1)
    }

    /// Identifier used for storage addressing
    ///
    /// Daily and archived games for the same date share an id, so opening a
    /// day from the archive resumes the progress made on that day.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Daily(date) | Self::Archive(date) => date.format(DATE_FORMAT).to_string(),
            Self::Custom(id) => format!("{CUSTOM_PREFIX}-{id}"),
        }
    }

    /// Key under which this game's snapshot is persisted
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rankword::core::GameKey;
    ///
    /// let key = GameKey::Archive(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    /// assert_eq!(key.storage_key(), "gameState_2025-06-10");
    /// ```
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("gameState_{}", self.id())
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for GameKey {
    type Err = GameKeyError;

    /// Parse `today`, `YYYY-MM-DD` as an archived game, and `custom:<id>`,
    /// `custom-<id>` or a bare 64-hex id as a custom game
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("today") {
            return Ok(Self::today());
        }

        if let Some(id) = s
            .strip_prefix("custom:")
            .or_else(|| s.strip_prefix("custom-"))
        {
            return Self::custom(id);
        }

        if s.len() == CUSTOM_ID_LEN {
            return Self::custom(s);
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self::Archive)
            .map_err(|_| GameKeyError::InvalidDate(s.to_string()))
    }
}
