//! Ranking directory validation
//!
//! Loads every ranking file in parallel and reports integrity problems: gaps
//! in the rank sequence, secrets that disagree with rank 1, secrets missing
//! from the allow-list and secrets reused across games.

use crate::core::{AllowedWords, normalize};
use crate::wordlists::{LoadError, RankingSource, load_ranking};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// Findings for one ranking file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub words: usize,
    pub missing_ranks: Vec<u32>,
    /// The rank-1 word
    pub secret: Option<String>,
    /// The file declares a secret that is not its rank-1 word
    pub secret_mismatch: bool,
    /// `None` when no allow-list was given
    pub secret_allowed: Option<bool>,
    /// Load failure; the other fields are empty when set
    pub error: Option<String>,
}

impl FileReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
            && self.missing_ranks.is_empty()
            && self.secret.is_some()
            && !self.secret_mismatch
            && self.secret_allowed != Some(false)
    }
}

/// Findings for a whole rankings directory
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    /// Secrets used by more than one file, with those files
    pub duplicate_secrets: Vec<(String, Vec<PathBuf>)>,
}

impl CheckReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.duplicate_secrets.is_empty() && self.files.iter().all(FileReport::is_ok)
    }

    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count() + self.duplicate_secrets.len()
    }
}

fn check_file(path: PathBuf, allowed: Option<&AllowedWords>) -> FileReport {
    match load_ranking(&path) {
        Ok(loaded) => {
            let secret = loaded.ranking.secret_word().map(str::to_string);
            let secret_allowed = allowed
                .filter(|a| a.is_loaded())
                .map(|a| secret.as_deref().is_some_and(|s| a.contains(s)));

            FileReport {
                words: loaded.ranking.len(),
                missing_ranks: loaded.ranking.missing_ranks(),
                secret_mismatch: loaded.secret_mismatch(),
                secret,
                secret_allowed,
                error: None,
                path,
            }
        }
        Err(e) => FileReport {
            error: Some(e.to_string()),
            path,
            ..FileReport::default()
        },
    }
}

/// Check every ranking file under `source`
///
/// A progress bar is drawn on stderr when `show_progress` is set.
///
/// # Errors
///
/// Returns `LoadError::Io` if the directory cannot be listed. Problems with
/// individual files are reported, not returned.
pub fn run_check(
    source: &RankingSource,
    allowed: Option<&AllowedWords>,
    show_progress: bool,
) -> Result<CheckReport, LoadError> {
    let files = source.ranking_files()?;
    tracing::info!(files = files.len(), dir = %source.dir().display(), "checking rankings");

    let pb = if show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let reports: Vec<FileReport> = files
        .into_par_iter()
        .map(|path| {
            let report = check_file(path, allowed);
            pb.inc(1);
            report
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut by_secret: FxHashMap<String, Vec<PathBuf>> = FxHashMap::default();
    for report in &reports {
        if let Some(secret) = &report.secret {
            by_secret
                .entry(normalize(secret))
                .or_default()
                .push(report.path.clone());
        }
    }

    let mut duplicate_secrets: Vec<(String, Vec<PathBuf>)> = by_secret
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .collect();
    duplicate_secrets.sort();

    Ok(CheckReport {
        files: reports,
        duplicate_secrets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::tests::scratch_dir;
    use std::fs;

    #[test]
    fn reports_problems_per_file() {
        let dir = scratch_dir("check");
        fs::create_dir_all(dir.join("custom")).unwrap();

        fs::write(
            dir.join("2025-06-02.json"),
            r#"[{"word": "море", "rank": 1}, {"word": "хвиля", "rank": 2}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("2025-06-03.json"),
            r#"{"secret_word": "сіль", "ranking": [{"word": "МОРЕ", "rank": 1}, {"word": "сіль", "rank": 3}]}"#,
        )
        .unwrap();
        fs::write(dir.join("2025-06-04.json"), "not json").unwrap();
        fs::write(
            dir.join("custom").join(format!("{}.json", "ab".repeat(32))),
            r#"[{"word": "ліс", "rank": 1}]"#,
        )
        .unwrap();

        let allowed: AllowedWords = ["море", "хвиля"].into_iter().collect();
        let report = run_check(&RankingSource::new(&dir), Some(&allowed), false).unwrap();

        assert_eq!(report.files.len(), 4);
        let by_name = |name: &str| {
            report
                .files
                .iter()
                .find(|f| f.path.ends_with(name))
                .unwrap()
        };

        let clean = by_name("2025-06-02.json");
        assert!(clean.is_ok());
        assert_eq!(clean.words, 2);
        assert_eq!(clean.secret_allowed, Some(true));

        let gappy = by_name("2025-06-03.json");
        assert_eq!(gappy.missing_ranks, vec![2]);
        assert!(gappy.secret_mismatch);
        assert!(!gappy.is_ok());

        let broken = by_name("2025-06-04.json");
        assert!(broken.error.is_some());
        assert!(!broken.is_ok());

        let custom = by_name(&format!("{}.json", "ab".repeat(32)));
        assert_eq!(custom.secret_allowed, Some(false));

        assert_eq!(report.duplicate_secrets.len(), 1);
        assert_eq!(report.duplicate_secrets[0].0, "море");
        assert_eq!(report.duplicate_secrets[0].1.len(), 2);

        assert!(!report.is_ok());
        assert_eq!(report.problem_count(), 4);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn without_allow_list_secrets_are_unchecked() {
        let dir = scratch_dir("check-no-list");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("2025-06-02.json"), r#"[{"word": "a", "rank": 1}]"#).unwrap();

        let report = run_check(&RankingSource::new(&dir), None, false).unwrap();
        assert_eq!(report.files[0].secret_allowed, None);
        assert!(report.is_ok());

        let _ = fs::remove_dir_all(&dir);
    }
}
