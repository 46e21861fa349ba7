//! Display functions for command results

use super::formatters::{RankBand, rank_bar};
use crate::commands::{ArchiveRow, ArchiveStatus, CheckReport, HintPreview};
use crate::core::{Rank, Ranking};
use crate::game::{GameSession, GuessEntry, Outcome};
use colored::Colorize;

const BAR_WIDTH: usize = 24;

/// Print the title line of an open game
pub fn print_game_header(session: &GameSession, ranking: &Ranking) {
    let key = session.key();
    let title = match key.game_number() {
        Some(number) => format!("Game #{number} ({key})"),
        None => format!("Game {key}"),
    };

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {}", title.bright_cyan().bold());
    println!(" {} words ranked", ranking.len());
    println!("{}", "═".repeat(60).cyan());
}

fn print_entry(entry: &GuessEntry, max_rank: u32, highlight: bool) {
    let word = format!("{:<20}", entry.word);
    let word = if highlight {
        word.bright_white().bold().underline()
    } else {
        word.normal()
    };

    if entry.is_error {
        let message = entry.error_message.as_deref().unwrap_or("not found");
        println!("  {} {}", word.italic(), message.bright_red());
        return;
    }

    let band = RankBand::classify(entry.rank, max_rank);
    println!(
        "  {} {} {}",
        word,
        rank_bar(entry.rank, max_rank, BAR_WIDTH),
        entry.rank.to_string().color(band.color())
    );
}

/// Print the latest reveal followed by every entry in display order
pub fn print_guesses(session: &GameSession, max_rank: u32) {
    let latest = session.latest_entry();

    println!(
        "\n Guesses: {}  Hints: {}  Best: {}",
        session.guess_count().to_string().bright_yellow(),
        session.hint_count().to_string().bright_yellow(),
        session.best_rank().to_string().bright_green()
    );

    if let Some(entry) = latest {
        println!("{}", "─".repeat(60).bright_black());
        print_entry(entry, max_rank, true);
        println!("{}", "─".repeat(60).bright_black());
    }

    for entry in session.sorted_view() {
        let is_latest = latest.is_some_and(|l| std::ptr::eq(l, entry));
        print_entry(entry, max_rank, is_latest);
    }
    println!();
}

/// Print the end-of-game banner, if the game has ended
pub fn print_game_over(session: &GameSession) {
    let secret = session.secret_word().unwrap_or("?");

    match session.outcome() {
        Outcome::Active => {}
        Outcome::Won => {
            println!("\n{}", "═".repeat(60).bright_cyan());
            println!(
                "{}",
                format!("    🎉 Found \"{secret}\" in {} guesses!", session.guess_count())
                    .bright_green()
                    .bold()
            );
            if session.hint_count() > 0 {
                println!("    with {} hints", session.hint_count());
            }
            println!("{}", "═".repeat(60).bright_cyan());
        }
        Outcome::GaveUp => {
            println!("\n{}", "═".repeat(60).bright_cyan());
            println!(
                "{}",
                format!("    The word was \"{secret}\"").bright_yellow().bold()
            );
            println!("{}", "═".repeat(60).bright_cyan());
        }
    }
}

/// Print the `limit` closest words of a ranking
pub fn print_closest(ranking: &Ranking, limit: usize, max_rank: u32) {
    let view = GameSession::ranked_entries_view(ranking, limit);
    println!("\n📋 {} closest words:", view.len());

    for entry in view {
        let rank = Rank::Ranked(entry.rank);
        let band = RankBand::classify(rank, max_rank);
        let similarity = entry
            .similarity
            .map(|s| format!("{s:.3}"))
            .unwrap_or_default();
        println!(
            "  {:>5}  {:<20} {}",
            entry.rank.to_string().color(band.color()),
            entry.word,
            similarity.bright_black()
        );
    }
    println!();
}

/// Print a hint sequence preview
pub fn print_hint_preview(preview: &HintPreview, max_rank: u32) {
    if !preview.seeded.is_empty() {
        println!("\n🌱 Seed guesses:");
        for entry in &preview.seeded {
            print_entry(entry, max_rank, false);
        }
    }

    for (word, reason) in &preview.rejected {
        println!("  {} {}", word.italic(), reason.to_string().yellow());
    }

    println!("\n💡 Hint sequence:");
    for (i, step) in preview.steps.iter().enumerate() {
        let arrow = if step.direction.is_ascending() { "↑" } else { "↓" };
        println!(
            "  {:>3}. {} {:<20} {}",
            (i + 1).to_string().bright_black(),
            arrow.cyan(),
            step.entry.word,
            step.entry.rank.to_string().bright_yellow()
        );
    }

    if preview.exhausted {
        println!("  {}", "(no more hints)".bright_black());
    }
    println!();
}

/// Print the archive listing
pub fn print_archive(rows: &[ArchiveRow]) {
    if rows.is_empty() {
        println!("No archived games found.");
        return;
    }

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "ARCHIVE".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for row in rows {
        let number = row
            .game_number
            .map_or_else(|| "-".to_string(), |n| format!("#{n}"));
        let status = match row.status {
            ArchiveStatus::NotStarted => "not started".bright_black(),
            ArchiveStatus::InProgress => "in progress".yellow(),
            ArchiveStatus::Won => "won".green(),
            ArchiveStatus::GaveUp => "gave up".red(),
        };
        let progress = if row.status == ArchiveStatus::NotStarted {
            String::new()
        } else {
            format!(
                "{} guesses, {} hints, best {}",
                row.guess_count, row.hint_count, row.best_rank
            )
        };

        println!("  {}  {:>5}  {:<12} {}", row.date, number, status, progress);
    }
    println!();
}

/// Print a ranking directory check
pub fn print_check_report(report: &CheckReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "RANKING CHECK".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for file in &report.files {
        let name = file
            .path
            .file_name()
            .map_or_else(|| file.path.display().to_string(), |n| n.to_string_lossy().into_owned());

        if let Some(error) = &file.error {
            println!("  {} {name}: {}", "✗".red(), error.red());
            continue;
        }

        let mark = if file.is_ok() { "✓".green() } else { "!".yellow() };
        println!(
            "  {mark} {name}: {} words, secret {}",
            file.words,
            file.secret.as_deref().unwrap_or("?").bright_white()
        );

        if !file.missing_ranks.is_empty() {
            let preview: Vec<String> = file
                .missing_ranks
                .iter()
                .take(10)
                .map(u32::to_string)
                .collect();
            println!(
                "      missing {} ranks: {}{}",
                file.missing_ranks.len(),
                preview.join(", "),
                if file.missing_ranks.len() > 10 { ", …" } else { "" }
            );
        }
        if file.secret_mismatch {
            println!("      declared secret differs from rank 1");
        }
        if file.secret_allowed == Some(false) {
            println!("      secret is not in the word list");
        }
    }

    if !report.duplicate_secrets.is_empty() {
        println!("\n  {}", "Secrets used more than once:".yellow());
        for (secret, paths) in &report.duplicate_secrets {
            let names: Vec<String> = paths
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            println!("    - {secret}: {}", names.join(", "));
        }
    }

    println!();
    if report.is_ok() {
        println!("{}", format!("✅ {} files OK", report.files.len()).green().bold());
    } else {
        println!(
            "{}",
            format!("❌ {} problems found", report.problem_count())
                .red()
                .bold()
        );
    }
}
