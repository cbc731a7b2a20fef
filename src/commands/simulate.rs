//! Offline simulation against the local referee
//!
//! Plays whole sessions, one after another, without touching the network and
//! gathers statistics about how many guesses the dictionary-order strategy needs.

use crate::core::Word;
use crate::referee::LocalReferee;
use crate::session::{GameSession, Outcome};
use crate::solver::{CandidateSource, Pruning};
use crate::wordlists::Wordlist;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashMap;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Which answers to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answers {
    /// A single known answer
    One(Word),
    /// `count` distinct answers drawn from the dictionary
    Sample { count: usize, seed: Option<u64> },
}

/// Everything `simulate` needs to know
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub answers: Answers,
    pub wordlist: Wordlist,
    pub pruning: Pruning,
    pub show_progress: bool,
}

/// Result of one simulated game
#[derive(Debug, Clone)]
pub struct GameResult {
    pub answer: String,
    pub guesses: Vec<String>,
    pub solved: bool,
    /// Error category for unsolved games
    pub failure: Option<&'static str>,
}

/// Statistics over all simulated games
#[derive(Debug)]
pub struct SimulationStatistics {
    pub total_games: usize,
    pub solved: usize,
    pub exhausted: usize,
    pub failed: usize,
    pub guess_distribution: FxHashMap<usize, usize>,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub hardest: Vec<(String, usize)>,
    pub total_time: Duration,
    pub results: Vec<GameResult>,
}

/// Draw up to `count` distinct valid answers from dictionary entries
///
/// The same seed over the same dictionary always gives the same answers.
///
/// # Examples
/// ```
/// use wordle_client::commands::simulate::choose_answers;
///
/// let entries = ["crane", "slate", "float", "oops"];
/// let first = choose_answers(&entries, 2, Some(7));
/// assert_eq!(first, choose_answers(&entries, 2, Some(7)));
/// assert_eq!(choose_answers(&entries, 10, Some(7)).len(), 3);
/// ```
#[must_use]
pub fn choose_answers<S: AsRef<str>>(entries: &[S], count: usize, seed: Option<u64>) -> Vec<Word> {
    let pool: Vec<Word> = entries
        .iter()
        .filter_map(|entry| Word::new(entry.as_ref().trim()).ok())
        .collect();

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    pool.choose_multiple(&mut rng, count).cloned().collect()
}

/// Play one game against a local referee
#[must_use]
pub fn simulate_game<S: AsRef<str>>(answer: &Word, entries: &[S], pruning: Pruning) -> GameResult {
    let referee = LocalReferee::new(answer.clone());
    let candidates = CandidateSource::new(entries.iter());
    let report = GameSession::new("simulator", referee, candidates, pruning).run();

    let guesses = report
        .history
        .iter()
        .map(|record| record.word.text().to_string())
        .collect();

    match report.outcome {
        Outcome::Success { .. } => GameResult {
            answer: answer.text().to_string(),
            guesses,
            solved: true,
            failure: None,
        },
        Outcome::Error(error) => {
            debug!(answer = %answer, %error, "simulated game failed");
            GameResult {
                answer: answer.text().to_string(),
                guesses,
                solved: false,
                failure: Some(error.kind()),
            }
        }
    }
}

/// Run every requested game in sequence
///
/// # Errors
///
/// Returns an I/O error if the dictionary cannot be opened.
pub fn run_simulation(config: &SimulateConfig) -> io::Result<SimulationStatistics> {
    let entries: Vec<String> = config.wordlist.entries()?.collect();

    let answers = match &config.answers {
        Answers::One(word) => vec![word.clone()],
        Answers::Sample { count, seed } => choose_answers(&entries, *count, *seed),
    };
    info!(games = answers.len(), dictionary = entries.len(), "simulating");

    let pb = if config.show_progress {
        ProgressBar::new(answers.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let mut results = Vec::with_capacity(answers.len());

    for (idx, answer) in answers.iter().enumerate() {
        results.push(simulate_game(answer, &entries, config.pruning));

        if idx % 10 == 0 {
            let avg = average_solved(&results);
            pb.set_message(format!("Avg: {avg:.2}"));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    Ok(summarize(results, start.elapsed()))
}

fn average_solved(results: &[GameResult]) -> f64 {
    let solved: Vec<usize> = results
        .iter()
        .filter(|r| r.solved)
        .map(|r| r.guesses.len())
        .collect();

    if solved.is_empty() {
        0.0
    } else {
        solved.iter().sum::<usize>() as f64 / solved.len() as f64
    }
}

fn summarize(results: Vec<GameResult>, total_time: Duration) -> SimulationStatistics {
    let mut guess_distribution: FxHashMap<usize, usize> = FxHashMap::default();
    for result in results.iter().filter(|r| r.solved) {
        *guess_distribution.entry(result.guesses.len()).or_insert(0) += 1;
    }

    let solved = results.iter().filter(|r| r.solved).count();
    let exhausted = results
        .iter()
        .filter(|r| r.failure == Some("exhausted"))
        .count();

    let mut hardest: Vec<(String, usize)> = results
        .iter()
        .filter(|r| r.solved)
        .map(|r| (r.answer.clone(), r.guesses.len()))
        .collect();
    hardest.sort_by_key(|(_, n)| std::cmp::Reverse(*n));
    hardest.truncate(5);

    SimulationStatistics {
        total_games: results.len(),
        solved,
        exhausted,
        failed: results.len() - solved - exhausted,
        min_guesses: guess_distribution.keys().min().copied().unwrap_or(0),
        max_guesses: guess_distribution.keys().max().copied().unwrap_or(0),
        average_guesses: average_solved(&results),
        guess_distribution,
        hardest,
        total_time,
        results,
    }
}
