//! Ranking and word list loading
//!
//! Rankings are JSON files produced by the ranking generator, either a bare
//! array of entries or a document wrapping the array with its metadata.
//! Word lists are plain text, one word per line.

use crate::core::{AllowedWords, GameKey, RankedEntry, Ranking, RankingError, Word, normalize};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no ranking for game {key} (looked for {path})")]
    NotFound { key: GameKey, path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed ranking JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid ranking in {path}: {source}")]
    Invalid { path: PathBuf, source: RankingError },
}

/// Both accepted layouts of a ranking file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankingFile {
    Entries(Vec<RankedEntry>),
    Document {
        ranking: Vec<RankedEntry>,
        #[serde(default)]
        game_date: Option<String>,
        #[serde(default)]
        secret_word: Option<String>,
    },
}

/// A ranking together with the metadata its file carried
#[derive(Debug, Clone)]
pub struct LoadedRanking {
    pub ranking: Ranking,
    pub game_date: Option<NaiveDate>,
    /// Secret word declared by the file; the rank-1 word is authoritative
    pub declared_secret: Option<String>,
}

impl LoadedRanking {
    /// Whether the declared secret, if any, disagrees with the rank-1 word
    #[must_use]
    pub fn secret_mismatch(&self) -> bool {
        match (&self.declared_secret, self.ranking.secret_word()) {
            (Some(declared), Some(actual)) => normalize(declared) != normalize(actual),
            _ => false,
        }
    }
}

/// Parse ranking JSON that did not come from a file
///
/// # Errors
///
/// Returns `LoadError::Json` or `LoadError::Invalid`, naming `origin`.
///
/// # Examples
/// ```
/// use rankword::wordlists::parse_ranking;
///
/// let loaded = parse_ranking(
///     r#"[{"word": "сонце", "rank": 1}, {"word": "зоря", "rank": 2}]"#,
///     "inline",
/// )
/// .unwrap();
/// assert_eq!(loaded.ranking.secret_word(), Some("сонце"));
/// ```
pub fn parse_ranking(json: &str, origin: impl AsRef<Path>) -> Result<LoadedRanking, LoadError> {
    let path = origin.as_ref();
    let file: RankingFile = serde_json::from_str(json).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let (entries, game_date, declared_secret) = match file {
        RankingFile::Entries(entries) => (entries, None, None),
        RankingFile::Document {
            ranking,
            game_date,
            secret_word,
        } => (
            ranking,
            game_date.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
            secret_word.filter(|w| !w.trim().is_empty()),
        ),
    };

    let ranking = Ranking::new(entries).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = LoadedRanking {
        ranking,
        game_date,
        declared_secret,
    };

    if loaded.secret_mismatch() {
        tracing::warn!(
            path = %path.display(),
            declared = ?loaded.declared_secret,
            actual = ?loaded.ranking.secret_word(),
            "declared secret differs from rank 1"
        );
    }
    if !loaded.ranking.is_dense() {
        tracing::warn!(
            path = %path.display(),
            missing = loaded.ranking.missing_ranks().len(),
            "ranking has gaps"
        );
    }

    Ok(loaded)
}

/// Load a ranking file
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or is not a valid ranking.
pub fn load_ranking(path: impl AsRef<Path>) -> Result<LoadedRanking, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = parse_ranking(&json, path)?;
    tracing::debug!(path = %path.display(), words = loaded.ranking.len(), "ranking loaded");
    Ok(loaded)
}

/// Words of a word list in file order, skipping blank and multi-word lines
#[must_use]
pub fn word_lines(content: &str) -> Vec<Word> {
    content.lines().filter_map(|line| Word::new(line).ok()).collect()
}

/// Build an allow-list from word list text
#[must_use]
pub fn allowed_from_str(content: &str) -> AllowedWords {
    word_lines(content).into_iter().collect()
}

/// Load an allow-list, one word per line
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use rankword::wordlists::load_allowed_words;
///
/// let allowed = load_allowed_words("wordlist.txt").unwrap();
/// println!("Loaded {} words", allowed.len());
/// ```
pub fn load_allowed_words(path: impl AsRef<Path>) -> Result<AllowedWords, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let allowed = allowed_from_str(&content);
    tracing::debug!(path = %path.display(), words = allowed.len(), "word list loaded");
    Ok(allowed)
}

/// Directory of ranking files addressed by game key
///
/// Dated games live at `<dir>/YYYY-MM-DD.json`, custom games at
/// `<dir>/custom/<id>.json`.
#[derive(Debug, Clone)]
pub struct RankingSource {
    dir: PathBuf,
}

impl RankingSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &GameKey) -> PathBuf {
        match key {
            GameKey::Daily(_) | GameKey::Archive(_) => self.dir.join(format!("{}.json", key.id())),
            GameKey::Custom(id) => self.dir.join("custom").join(format!("{id}.json")),
        }
    }

    /// Load the ranking for `key`
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if no file exists for the key, or any
    /// other `LoadError` from reading it.
    pub fn load(&self, key: &GameKey) -> Result<LoadedRanking, LoadError> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(LoadError::NotFound {
                key: key.clone(),
                path,
            });
        }

        let loaded = load_ranking(&path)?;
        if let (Some(declared), Some(date)) = (loaded.game_date, key.date())
            && declared != date
        {
            tracing::warn!(path = %path.display(), %declared, expected = %date, "ranking file date mismatch");
        }
        Ok(loaded)
    }

    /// Dates with a ranking file, newest first
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the directory exists but cannot be listed.
    pub fn archived_dates(&self) -> Result<Vec<NaiveDate>, LoadError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut dates: Vec<NaiveDate> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stem = name.to_str()?.strip_suffix(".json")?;
                NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
            })
            .collect();

        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    /// Every ranking file of the directory (dated and custom), sorted by path
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if a directory exists but cannot be listed.
    pub fn ranking_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();
        for dir in [self.dir.clone(), self.dir.join("custom")] {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(LoadError::Io { path: dir, source }),
            };
            files.extend(
                entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json")),
            );
        }
        files.sort();
        Ok(files)
    }
}
