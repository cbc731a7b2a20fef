//! Message types exchanged with the game server
//!
//! Two layers live here. The serde-derived frames mirror the JSON on the wire
//! exactly; [`ServerMessage`] is the validated form the session works with.

use crate::core::GuessRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the server assigns to one game
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Messages sent from client to server
///
/// Serialized with an internal `type` tag:
/// `{"type":"hello","northeastern_username":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Hello { northeastern_username: String },
    Guess { id: GameId, word: String },
}

impl ClientMessage {
    #[must_use]
    pub fn hello(username: impl Into<String>) -> Self {
        Self::Hello {
            northeastern_username: username.into(),
        }
    }

    #[must_use]
    pub fn guess(id: &GameId, word: impl Into<String>) -> Self {
        Self::Guess {
            id: id.clone(),
            word: word.into(),
        }
    }
}

/// One scored guess exactly as it appears inside a `retry` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireGuess {
    pub word: String,
    pub marks: Vec<i64>,
}

impl From<&GuessRecord> for WireGuess {
    fn from(record: &GuessRecord) -> Self {
        Self {
            word: record.word.text().to_string(),
            marks: record.marks.values(),
        }
    }
}

/// Messages sent from server to client, as they appear on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerFrame {
    Start {
        id: GameId,
    },
    Retry {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<GameId>,
        guesses: Vec<WireGuess>,
    },
    Bye {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<GameId>,
        flag: String,
    },
}

/// A decoded server message
///
/// Decoding never fails outright: anything that cannot be understood becomes
/// [`ServerMessage::Malformed`], keeping the raw text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Started {
        id: GameId,
    },
    Retry {
        id: Option<GameId>,
        /// Cumulative history; the newest guess is last
        guesses: Vec<GuessRecord>,
    },
    Bye {
        id: Option<GameId>,
        flag: String,
    },
    Malformed {
        raw: String,
        reason: String,
    },
}

impl ServerMessage {
    /// Short name of the message type, for diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "start",
            Self::Retry { .. } => "retry",
            Self::Bye { .. } => "bye",
            Self::Malformed { .. } => "malformed",
        }
    }
}
