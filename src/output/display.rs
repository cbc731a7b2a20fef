//! Display functions for command results

use super::formatters::{colored_guess, create_progress_bar, percentage};
use crate::commands::SimulationStatistics;
use crate::session::{Outcome, SessionReport};
use colored::Colorize;

/// Print the result of one game
///
/// The flag, when there is one, is always the last line written to stdout so
/// it can be picked up with `tail -n1`.
pub fn print_session_report(report: &SessionReport, verbose: bool) {
    if verbose {
        println!("\n{}", "─".repeat(60).cyan());
        match &report.session_id {
            Some(id) => println!("Game: {}", id.as_str().bright_yellow().bold()),
            None => println!("Game: {}", "not started".bright_black()),
        }
        println!("{}", "─".repeat(60).cyan());

        for (i, record) in report.history.iter().enumerate() {
            println!(
                "Turn {:>3}: {} {}",
                i + 1,
                colored_guess(record),
                record.marks.to_emoji()
            );
        }

        let stats = report.candidates;
        println!(
            "\nDictionary: {} examined, {} rejected, {} malformed",
            stats.examined, stats.rejected, stats.malformed
        );
    }

    match &report.outcome {
        Outcome::Success { flag } => {
            if verbose {
                println!(
                    "{}",
                    format!("✅ Solved in {} guesses!", report.guesses_sent)
                        .green()
                        .bold()
                );
            }
            println!("{flag}");
        }
        Outcome::Error(error) => {
            eprintln!(
                "{} {}",
                format!("❌ Game failed after {} guesses:", report.guesses_sent)
                    .red()
                    .bold(),
                error
            );
        }
    }
}

/// Print simulation statistics
pub fn print_simulation_statistics(stats: &SimulationStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Simulation Results ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall".bright_cyan().bold());
    println!("  Games played:        {}", stats.total_games);
    println!(
        "  Solved:              {} {}",
        stats.solved,
        percentage(stats.solved, stats.total_games).green()
    );
    if stats.exhausted > 0 {
        println!(
            "  Dictionary exhausted: {} {}",
            stats.exhausted,
            percentage(stats.exhausted, stats.total_games).yellow()
        );
    }
    if stats.failed > 0 {
        println!(
            "  Other failures:      {} {}",
            stats.failed,
            percentage(stats.failed, stats.total_games).red()
        );
    }
    println!(
        "  Average guesses:     {}",
        format!("{:.3}", stats.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "  Best / worst:        {} / {}",
        format!("{}", stats.min_guesses).green(),
        format!("{}", stats.max_guesses).yellow()
    );
    println!(
        "  Total time:          {:.2}s",
        stats.total_time.as_secs_f64()
    );

    if stats.solved == 0 {
        return;
    }

    println!("\n📈 {}", "Guess Distribution".bright_cyan().bold());
    let max_count = stats.guess_distribution.values().copied().max().unwrap_or(1);
    for guesses in stats.min_guesses..=stats.max_guesses {
        let count = stats.guess_distribution.get(&guesses).copied().unwrap_or(0);
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        println!(
            "  {guesses:3} guesses: {} {count:4} {}",
            bar.green(),
            percentage(count, stats.solved)
        );
    }

    if !stats.hardest.is_empty() {
        println!("\n😰 {}", "Hardest Answers".yellow().bold());
        for (word, guesses) in &stats.hardest {
            println!("  {} ({} guesses)", word.to_uppercase().yellow(), guesses);
        }
    }
}
