//! Formatting utilities for terminal output

use crate::core::Rank;
use colored::{Color, ColoredString, Colorize};

/// Closeness band of a revealed rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankBand {
    Exact,
    VeryClose,
    Close,
    Medium,
    Far,
    VeryFar,
    /// Unranked or outside the ranking
    Error,
}

impl RankBand {
    pub const VERY_CLOSE: u32 = 50;
    pub const CLOSE: u32 = 150;
    pub const MEDIUM: u32 = 500;
    pub const FAR: u32 = 1000;

    /// Classify `rank` for a ranking whose highest rank is `max_rank`
    #[must_use]
    pub const fn classify(rank: Rank, max_rank: u32) -> Self {
        match rank {
            Rank::Infinite | Rank::Ranked(0) => Self::Error,
            Rank::Ranked(r) if r > max_rank => Self::Error,
            Rank::Ranked(1) => Self::Exact,
            Rank::Ranked(r) if r <= Self::VERY_CLOSE => Self::VeryClose,
            Rank::Ranked(r) if r <= Self::CLOSE => Self::Close,
            Rank::Ranked(r) if r <= Self::MEDIUM => Self::Medium,
            Rank::Ranked(r) if r <= Self::FAR => Self::Far,
            Rank::Ranked(_) => Self::VeryFar,
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Exact => Color::BrightGreen,
            Self::VeryClose => Color::Green,
            Self::Close => Color::BrightYellow,
            Self::Medium => Color::Yellow,
            Self::Far => Color::Red,
            Self::VeryFar => Color::BrightBlack,
            Self::Error => Color::BrightRed,
        }
    }
}

/// Bar width in percent for a revealed rank
///
/// The secret fills the bar and errors get a stub. Other ranks follow a log
/// scale clamped to 10..=98, so the bar still moves visibly among the
/// thousands while ranks near the top stay distinguishable.
#[must_use]
pub fn fill_percent(rank: Rank, max_rank: u32) -> f64 {
    const MIN: f64 = 10.0;
    const MAX: f64 = 98.0;

    match RankBand::classify(rank, max_rank) {
        RankBand::Error => 5.0,
        RankBand::Exact => 100.0,
        _ => {
            let Rank::Ranked(rank) = rank else {
                return 5.0;
            };
            let log_max = f64::from(max_rank.max(2)).ln();
            let log_rank = f64::from(rank).ln();
            let scale = ((log_max - log_rank) / log_max).max(0.0);
            (MIN + scale * (MAX - MIN)).clamp(MIN, MAX)
        }
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for a revealed rank, colored by its band
#[must_use]
pub fn rank_bar(rank: Rank, max_rank: u32, width: usize) -> ColoredString {
    let band = RankBand::classify(rank, max_rank);
    create_progress_bar(fill_percent(rank, max_rank), 100.0, width).color(band.color())
}
