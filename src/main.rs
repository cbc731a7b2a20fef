//! Wordle protocol client - CLI
//!
//! Plays the guessing game against a remote server over TCP or TLS, or
//! simulates games offline against a local referee.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wordle_client::{
    commands::{Answers, PlayConfig, SimulateConfig, run_play, run_simulation},
    core::Word,
    output::{print_session_report, print_simulation_statistics},
    solver::Pruning,
    transport::ConnectOptions,
    wordlists::Wordlist,
};

#[derive(Parser)]
#[command(
    name = "wordle_client",
    about = "Wordle protocol client: guesses in dictionary order, pruning with server feedback",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dictionary: 'embedded' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Feedback pruning: strict (default) or positions-only
    #[arg(long, global = true, default_value = "strict", value_parser = parse_pruning)]
    pruning: Pruning,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game against a server and print the flag
    Play(PlayArgs),

    /// Play games offline against a local referee
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct PlayArgs {
    /// Server port (default: 27993, or 27994 with -s)
    #[arg(short, long)]
    port: Option<u16>,

    /// Use a TLS encrypted socket
    #[arg(short = 's', long = "tls")]
    tls: bool,

    /// Seconds to wait on connect, read or write; 0 waits forever
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Server hostname
    hostname: String,

    /// Username sent in the hello message
    username: String,
}

#[derive(Args)]
struct SimulateArgs {
    /// Play exactly this answer
    #[arg(short, long, conflicts_with = "count")]
    answer: Option<String>,

    /// Number of answers to draw from the dictionary
    #[arg(short = 'n', long, default_value = "100")]
    count: usize,

    /// Seed for drawing answers, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn parse_pruning(name: &str) -> Result<Pruning, String> {
    Pruning::from_name(name)
        .ok_or_else(|| format!("unknown pruning {name:?} (expected strict or positions-only)"))
}

/// Install the global subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let wordlist = Wordlist::from_arg(&cli.wordlist);

    match cli.command {
        Commands::Play(args) => run_play_command(args, wordlist, cli.pruning, cli.verbose > 0),
        Commands::Simulate(args) => run_simulate_command(args, wordlist, cli.pruning),
    }
}

fn run_play_command(
    args: PlayArgs,
    wordlist: Wordlist,
    pruning: Pruning,
    verbose: bool,
) -> Result<ExitCode> {
    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let connect = ConnectOptions::new(args.hostname, args.tls)
        .with_port(args.port)
        .with_timeout(timeout);
    let target = format!("{}:{}", connect.host, connect.port);

    let config = PlayConfig {
        connect,
        username: args.username,
        wordlist,
        pruning,
    };

    let report = run_play(&config).with_context(|| format!("could not play against {target}"))?;
    print_session_report(&report, verbose);

    Ok(if report.outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_simulate_command(
    args: SimulateArgs,
    wordlist: Wordlist,
    pruning: Pruning,
) -> Result<ExitCode> {
    let answers = match args.answer {
        Some(answer) => Answers::One(
            Word::new(answer.as_str()).with_context(|| format!("invalid answer {answer:?}"))?,
        ),
        None => Answers::Sample {
            count: args.count,
            seed: args.seed,
        },
    };

    let config = SimulateConfig {
        answers,
        wordlist,
        pruning,
        show_progress: !args.no_progress,
    };

    let stats = run_simulation(&config).context("could not open dictionary")?;
    print_simulation_statistics(&stats);

    Ok(if stats.solved == stats.total_games {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
