//! Formatting utilities for terminal output

use crate::core::{GuessRecord, Mark};
use colored::{ColoredString, Colorize};

/// Render a guess with each letter colored by its mark
#[must_use]
pub fn colored_guess(record: &GuessRecord) -> String {
    record
        .word
        .text()
        .chars()
        .zip(record.marks.iter())
        .map(|(letter, mark)| paint(letter.to_ascii_uppercase(), mark).to_string())
        .collect()
}

fn paint(letter: char, mark: Mark) -> ColoredString {
    let letter = letter.to_string();
    match mark {
        Mark::Correct => letter.black().on_green().bold(),
        Mark::Present => letter.black().on_yellow().bold(),
        Mark::Absent => letter.white().on_bright_black(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a count as a share of a total, e.g. "( 40.0%)"
#[must_use]
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return format!("({:5.1}%)", 0.0);
    }
    format!("({:5.1}%)", count as f64 / total as f64 * 100.0)
}
