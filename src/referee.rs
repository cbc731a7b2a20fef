//! In-process game server
//!
//! [`LocalReferee`] answers a client's frames the way the real server would
//! for a known answer: `hello` gets `start`, each wrong `guess` gets `retry`
//! carrying the whole scored history, and the right guess gets `bye` with a
//! flag. It implements [`Transport`], so a [`GameSession`] can play against it
//! without a network.
//!
//! [`GameSession`]: crate::session::GameSession

use crate::core::{GuessRecord, Marks, Word};
use crate::protocol::{ClientMessage, GameId, ServerFrame, WireGuess, decode_client, encode};
use crate::transport::Transport;
use std::collections::VecDeque;
use std::io;

/// A scripted opponent that knows the answer
pub struct LocalReferee {
    answer: Word,
    id: GameId,
    flag: String,
    history: Vec<GuessRecord>,
    started: bool,
    finished: bool,
    outbox: VecDeque<Vec<u8>>,
}

impl LocalReferee {
    #[must_use]
    pub fn new(answer: Word) -> Self {
        let id = GameId::new(format!("local-{answer}"));
        let flag = format!("FLAG{{{answer}}}");
        Self {
            answer,
            id,
            flag,
            history: Vec::new(),
            started: false,
            finished: false,
            outbox: VecDeque::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn answer(&self) -> &Word {
        &self.answer
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> &GameId {
        &self.id
    }

    /// Wrong guesses scored so far
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    fn respond(&mut self, message: ClientMessage) -> io::Result<ServerFrame> {
        match message {
            ClientMessage::Hello { .. } if self.started => Err(invalid("second hello")),
            ClientMessage::Hello { .. } => {
                self.started = true;
                Ok(ServerFrame::Start {
                    id: self.id.clone(),
                })
            }
            ClientMessage::Guess { .. } if !self.started => Err(invalid("guess before hello")),
            ClientMessage::Guess { id, .. } if id != self.id => {
                Err(invalid(&format!("unknown game id {id}")))
            }
            ClientMessage::Guess { word, .. } => {
                let guess = Word::new(word.as_str())
                    .map_err(|e| invalid(&format!("invalid guess {word:?}: {e}")))?;
                let marks = Marks::score(&guess, &self.answer);

                if marks.is_solved() {
                    self.finished = true;
                    return Ok(ServerFrame::Bye {
                        id: Some(self.id.clone()),
                        flag: self.flag.clone(),
                    });
                }

                self.history.push(GuessRecord::new(guess, marks));
                Ok(ServerFrame::Retry {
                    id: Some(self.id.clone()),
                    guesses: self.history.iter().map(WireGuess::from).collect(),
                })
            }
        }
    }
}

impl Transport for LocalReferee {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "game already over",
            ));
        }

        let message = decode_client(frame).map_err(io::Error::other)?;
        let reply = self.respond(message)?;
        let mut bytes = encode(&reply).map_err(io::Error::other)?;
        // Transport::recv hands frames back without their newline
        bytes.pop();
        self.outbox.push_back(bytes);
        Ok(())
    }

    fn recv(&mut self) -> io::Result<Vec<u8>> {
        self.outbox.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no reply pending")
        })
    }
}

fn invalid(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.to_string())
}
