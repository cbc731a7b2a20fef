//! Wire protocol
//!
//! Newline-delimited JSON messages for the hello/start/guess/retry/bye exchange,
//! and the codec that turns them into bytes and back.

mod codec;
mod error;
mod message;

pub use codec::{decode, decode_client, encode};
pub use error::ProtocolError;
pub use message::{ClientMessage, GameId, ServerFrame, ServerMessage, WireGuess};
