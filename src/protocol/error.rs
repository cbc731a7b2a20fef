//! Protocol error types
//!
//! Every variant raised while talking to the server carries the offending raw
//! line, so a desynchronized exchange can be diagnosed from the error alone.

use super::message::GameId;

/// Errors that can occur while encoding or interpreting protocol messages
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of an outgoing message failed
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// An incoming line is not valid JSON, lacks a required key, or has an unknown type
    #[error("malformed message ({reason}): {raw}")]
    Malformed { raw: String, reason: String },

    /// A well-formed message arrived in a state that does not expect it
    #[error("unexpected '{received}' message while {expected}: {raw}")]
    Unexpected {
        expected: &'static str,
        received: &'static str,
        raw: String,
    },

    /// Feedback that cannot be applied to the guess it claims to score
    #[error("invalid feedback ({reason}): {raw}")]
    Feedback { reason: String, raw: String },

    /// A message tagged with a different game than the one in progress
    #[error("game id mismatch (expected {expected}, got {received}): {raw}")]
    IdMismatch {
        expected: GameId,
        received: GameId,
        raw: String,
    },
}
