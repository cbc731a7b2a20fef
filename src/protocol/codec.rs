//! Line-delimited JSON encoding and decoding
//!
//! Every message is one JSON object followed by `\n`. No other framing exists,
//! and `serde_json`'s string escaping keeps embedded quotes and newlines inside
//! a single line.

use super::error::ProtocolError;
use super::message::{ClientMessage, ServerFrame, ServerMessage, WireGuess};
use crate::core::{GuessRecord, Marks, Word};
use serde::Serialize;

/// Encode a message as one newline-terminated JSON line
///
/// # Errors
/// Returns `ProtocolError::Encode` if serialization fails.
///
/// # Examples
/// ```
/// use wordle_client::protocol::{ClientMessage, encode};
///
/// let bytes = encode(&ClientMessage::hello("alice")).unwrap();
/// assert_eq!(bytes, b"{\"type\":\"hello\",\"northeastern_username\":\"alice\"}\n");
/// ```
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    let mut bytes = serde_json::to_vec(message).map_err(ProtocolError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode one line from the server
///
/// Never fails: unparsable input becomes [`ServerMessage::Malformed`].
#[must_use]
pub fn decode(frame: &[u8]) -> ServerMessage {
    let raw = match std::str::from_utf8(trim_line_ending(frame)) {
        Ok(text) => text,
        Err(e) => {
            return ServerMessage::Malformed {
                raw: String::from_utf8_lossy(frame).into_owned(),
                reason: format!("not UTF-8: {e}"),
            };
        }
    };

    let malformed = |reason: String| ServerMessage::Malformed {
        raw: raw.to_string(),
        reason,
    };

    match serde_json::from_str::<ServerFrame>(raw) {
        Ok(ServerFrame::Start { id }) => ServerMessage::Started { id },
        Ok(ServerFrame::Retry { id, guesses }) => match records_from_wire(&guesses) {
            Ok(guesses) => ServerMessage::Retry { id, guesses },
            Err(reason) => malformed(reason),
        },
        Ok(ServerFrame::Bye { id, flag }) => ServerMessage::Bye { id, flag },
        Err(e) => malformed(e.to_string()),
    }
}

/// Decode one line sent by a client
///
/// # Errors
/// Returns `ProtocolError::Malformed` if the line is not a valid client message.
pub fn decode_client(frame: &[u8]) -> Result<ClientMessage, ProtocolError> {
    let raw = trim_line_ending(frame);
    serde_json::from_slice(raw).map_err(|e| ProtocolError::Malformed {
        raw: String::from_utf8_lossy(raw).into_owned(),
        reason: e.to_string(),
    })
}

fn records_from_wire(guesses: &[WireGuess]) -> Result<Vec<GuessRecord>, String> {
    guesses
        .iter()
        .enumerate()
        .map(|(index, guess)| {
            let word = Word::new(guess.word.as_str())
                .map_err(|e| format!("guesses[{index}].word {:?}: {e}", guess.word))?;
            let marks = Marks::from_values(&guess.marks)
                .map_err(|e| format!("guesses[{index}].marks: {e}"))?;
            Ok(GuessRecord::new(word, marks))
        })
        .collect()
}

fn trim_line_ending(frame: &[u8]) -> &[u8] {
    let frame = frame.strip_suffix(b"\n").unwrap_or(frame);
    frame.strip_suffix(b"\r").unwrap_or(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::message::GameId;

    fn assert_malformed(frame: &[u8], reason_part: &str) {
        match decode(frame) {
            ServerMessage::Malformed { raw, reason } => {
                assert!(
                    reason.contains(reason_part),
                    "reason {reason:?} lacks {reason_part:?}"
                );
                assert_eq!(raw, String::from_utf8_lossy(trim_line_ending(frame)));
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn encode_hello() {
        let bytes = encode(&ClientMessage::hello("student")).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"type\":\"hello\",\"northeastern_username\":\"student\"}\n"
        );
    }

    #[test]
    fn encode_guess() {
        let id = GameId::new("abc123");
        let bytes = encode(&ClientMessage::guess(&id, "crane")).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"type\":\"guess\",\"id\":\"abc123\",\"word\":\"crane\"}\n"
        );
    }

    #[test]
    fn encode_escapes_instead_of_overflowing() {
        let username = "a\"b\nc".repeat(500);
        let bytes = encode(&ClientMessage::hello(username.clone())).unwrap();

        // Exactly one newline: the terminator
        assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 1);
        assert_eq!(bytes.last(), Some(&b'\n'));
        assert_eq!(decode_client(&bytes).unwrap(), ClientMessage::hello(username));
    }

    #[test]
    fn decode_start() {
        let message = decode(b"{\"type\":\"start\",\"id\":\"g-1\"}\n");
        assert_eq!(
            message,
            ServerMessage::Started {
                id: GameId::new("g-1")
            }
        );
    }

    #[test]
    fn decode_retry_keeps_history_order() {
        let frame = br#"{"type":"retry","id":"g-1","guesses":[{"word":"crane","marks":[0,0,2,0,2]},{"word":"slate","marks":[0,1,2,0,2]}]}"#;
        let ServerMessage::Retry { id, guesses } = decode(frame) else {
            panic!("expected retry");
        };

        assert_eq!(id, Some(GameId::new("g-1")));
        assert_eq!(guesses.len(), 2);
        assert_eq!(guesses[0].word.text(), "crane");
        assert_eq!(guesses[1].word.text(), "slate");
        assert_eq!(guesses[1].marks.values(), vec![0, 1, 2, 0, 2]);
    }

    #[test]
    fn decode_bye() {
        let message = decode(b"{\"type\":\"bye\",\"id\":\"g-1\",\"flag\":\"FLAG{test}\"}\r\n");
        assert_eq!(
            message,
            ServerMessage::Bye {
                id: Some(GameId::new("g-1")),
                flag: "FLAG{test}".to_string(),
            }
        );
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let message = decode(br#"{"type":"start","id":"g-2","motd":"hi"}"#);
        assert_eq!(message.kind(), "start");
    }

    #[test]
    fn decode_invalid_json_is_malformed() {
        assert_malformed(b"{\"type\":\"start\",", "EOF");
        assert_malformed(b"not json at all\n", "expected");
    }

    #[test]
    fn decode_missing_key_is_malformed() {
        assert_malformed(b"{\"type\":\"start\"}\n", "missing field `id`");
        assert_malformed(b"{\"type\":\"bye\",\"id\":\"g\"}\n", "missing field `flag`");
        assert_malformed(b"{\"id\":\"g\"}\n", "missing field `type`");
    }

    #[test]
    fn decode_unknown_type_is_malformed() {
        assert_malformed(b"{\"type\":\"error\",\"message\":\"nope\"}\n", "unknown variant");
    }

    #[test]
    fn decode_bad_marks_are_malformed() {
        assert_malformed(
            br#"{"type":"retry","id":"g","guesses":[{"word":"crane","marks":[0,0,2]}]}"#,
            "expected 5 marks, got 3",
        );
        assert_malformed(
            br#"{"type":"retry","id":"g","guesses":[{"word":"crane","marks":[0,0,2,0,7]}]}"#,
            "mark value 7",
        );
        assert_malformed(
            br#"{"type":"retry","id":"g","guesses":[{"word":"crane","marks":[0,0,"2",0,0]}]}"#,
            "invalid type",
        );
    }

    #[test]
    fn decode_bad_guess_word_is_malformed() {
        assert_malformed(
            br#"{"type":"retry","id":"g","guesses":[{"word":"cranes","marks":[0,0,0,0,0]}]}"#,
            "guesses[0].word",
        );
    }

    #[test]
    fn decode_non_utf8_is_malformed() {
        match decode(b"{\"type\":\"start\",\"id\":\"\xff\"}\n") {
            ServerMessage::Malformed { reason, .. } => assert!(reason.starts_with("not UTF-8")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn decode_client_guess() {
        let message = decode_client(b"{\"type\":\"guess\",\"id\":\"g\",\"word\":\"float\"}\n").unwrap();
        assert_eq!(message, ClientMessage::guess(&GameId::new("g"), "float"));
    }
}
