//! Rankword - CLI
//!
//! Semantic word-ranking guessing game: guess the secret word, guided by how
//! close each guess ranks to it.

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::prelude::IndexedRandom;
use rankword::{
    commands::{Game, list_archive, preview_hints, run_check, run_play},
    core::{AllowedWords, GameKey},
    output::display::{print_archive, print_check_report, print_closest, print_hint_preview},
    storage::FileStore,
    wordlists::{RankingSource, load_allowed_words},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rankword",
    about = "Guess the secret word by semantic closeness",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory of ranking files (YYYY-MM-DD.json, custom/<id>.json)
    #[arg(short, long, global = true, env = "RANKWORD_RANKINGS", default_value = "rankings")]
    rankings: PathBuf,

    /// Directory where game progress is saved
    #[arg(short, long, global = true, env = "RANKWORD_STORE", default_value = ".rankword")]
    store: PathBuf,

    /// Optional allow-list, one word per line
    #[arg(short = 'w', long, global = true, env = "RANKWORD_WORDLIST")]
    wordlist: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (default: today's)
    Play {
        /// today, YYYY-MM-DD, or custom:<id>
        key: Option<GameKey>,

        /// Play a random archived game
        #[arg(long, conflicts_with = "key")]
        random: bool,
    },

    /// Preview the hint sequence for a game
    Hints {
        /// today, YYYY-MM-DD, or custom:<id>
        #[arg(default_value = "today")]
        key: GameKey,

        /// Words to guess before requesting hints
        #[arg(short, long, value_delimiter = ',')]
        guesses: Vec<String>,

        /// Maximum number of hints to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show the closest words of a game
    Top {
        /// today, YYYY-MM-DD, or custom:<id>
        #[arg(default_value = "today")]
        key: GameKey,

        /// Number of words to list
        #[arg(short = 'n', long, default_value = "500")]
        limit: usize,
    },

    /// List archived games and saved progress
    Archive,

    /// Validate every ranking file
    Check,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "rankword=debug",
        _ => "rankword=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_wordlist(path: Option<&Path>) -> Result<Option<AllowedWords>> {
    path.map(|p| {
        load_allowed_words(p).with_context(|| format!("loading word list {}", p.display()))
    })
    .transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = RankingSource::new(&cli.rankings);
    let allowed = load_wordlist(cli.wordlist.as_deref())?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        key: None,
        random: false,
    });

    match command {
        Commands::Play { key, random } => {
            let key = if random {
                random_archived(&source)?
            } else {
                key.unwrap_or_else(GameKey::today)
            };
            let store = FileStore::new(&cli.store);
            let mut game = Game::open(store, &source, allowed.as_ref(), key)?;
            run_play(&mut game)
        }
        Commands::Hints {
            key,
            guesses,
            count,
        } => {
            let ranking = source.load(&key)?.ranking;
            let preview = preview_hints(key, &ranking, &guesses, count)?;
            print_hint_preview(&preview, ranking.max_rank());
            Ok(())
        }
        Commands::Top { key, limit } => {
            let ranking = source.load(&key)?.ranking;
            print_closest(&ranking, limit, ranking.max_rank());
            Ok(())
        }
        Commands::Archive => {
            let store = FileStore::new(&cli.store);
            let rows = list_archive(&source, &store, Local::now().date_naive())?;
            print_archive(&rows);
            Ok(())
        }
        Commands::Check => {
            let report = run_check(&source, allowed.as_ref(), true)?;
            print_check_report(&report);
            if !report.is_ok() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn random_archived(source: &RankingSource) -> Result<GameKey> {
    let today = Local::now().date_naive();
    let dates: Vec<_> = source
        .archived_dates()?
        .into_iter()
        .filter(|d| *d < today)
        .collect();

    let Some(date) = dates.choose(&mut rand::rng()) else {
        bail!("no archived games in {}", source.dir().display());
    };
    Ok(GameKey::Archive(*date))
}
