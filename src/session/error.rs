//! Session error types

use crate::protocol::ProtocolError;
use std::io;

/// Why a session ended without a flag
///
/// Every variant is terminal; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The connection failed (refused, reset, closed, timed out)
    #[error("transport failed while {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// The server sent something the session cannot make sense of
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Every dictionary word was ruled out before the server said bye
    #[error("dictionary exhausted after {guesses} guesses without a bye")]
    Exhausted { guesses: usize },
}

impl SessionError {
    /// Short category name for reports
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Protocol(_) => "protocol",
            Self::Exhausted { .. } => "exhausted",
        }
    }
}
