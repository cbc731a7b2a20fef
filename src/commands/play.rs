//! Play one game against a remote server

use crate::session::{GameSession, SessionReport};
use crate::solver::{CandidateSource, Pruning};
use crate::transport::{ConnectError, ConnectOptions, connect};
use crate::wordlists::Wordlist;
use std::io;
use tracing::debug;

/// Everything `play` needs to know
#[derive(Debug, Clone)]
pub struct PlayConfig {
    pub connect: ConnectOptions,
    pub username: String,
    pub wordlist: Wordlist,
    pub pruning: Pruning,
}

/// Failures that happen before the session starts
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("could not open dictionary {wordlist:?}")]
    Dictionary {
        wordlist: Wordlist,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),
}

/// Connect and play a single game to completion
///
/// A game that ends in a session error is still a report, not an `Err`; only
/// failing to get as far as sending hello is.
///
/// # Errors
///
/// Returns `PlayError` if the dictionary cannot be opened or the server cannot
/// be reached.
pub fn run_play(config: &PlayConfig) -> Result<SessionReport, PlayError> {
    let entries = config
        .wordlist
        .entries()
        .map_err(|source| PlayError::Dictionary {
            wordlist: config.wordlist.clone(),
            source,
        })?;

    let transport = connect(&config.connect)?;
    let session = GameSession::new(
        config.username.as_str(),
        transport,
        CandidateSource::new(entries),
        config.pruning,
    );

    let report = session.run();
    debug!(
        examined = report.candidates.examined,
        rejected = report.candidates.rejected,
        malformed = report.candidates.malformed,
        "dictionary usage"
    );
    Ok(report)
}
