//! One game, from hello to bye
//!
//! A [`GameSession`] owns everything a game needs: the transport, the knowledge
//! state and the candidate source. It moves through
//! `AwaitingStart → Guessing → Done` one blocking request/response at a time.
//! Exactly one guess is ever in flight, and a guess is never resent: the
//! server counts guesses, so a retransmission could desynchronize the game.

mod error;

pub use error::SessionError;

use crate::core::{GuessRecord, Marks, Word};
use crate::protocol::{ClientMessage, GameId, ProtocolError, ServerMessage, decode, encode};
use crate::solver::{CandidateSource, CandidateStats, KnowledgeState, Pruning};
use crate::transport::Transport;
use tracing::{debug, info, trace, warn};

/// Where a session is in the exchange
#[derive(Debug)]
pub enum SessionState {
    /// Hello not yet answered
    AwaitingStart,
    /// Game in progress under the given id
    Guessing { id: GameId },
    /// Terminal; there is no transition out
    Done(Outcome),
}

/// How a finished session ended
#[derive(Debug)]
pub enum Outcome {
    Success { flag: String },
    Error(SessionError),
}

impl Outcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::Success { flag } => Some(flag),
            Self::Error(_) => None,
        }
    }
}

/// Everything worth knowing about a finished session
#[derive(Debug)]
pub struct SessionReport {
    pub session_id: Option<GameId>,
    pub outcome: Outcome,
    /// Scored guesses in the order they were made; a winning guess is all-correct
    pub history: Vec<GuessRecord>,
    pub guesses_sent: usize,
    pub candidates: CandidateStats,
}

/// A single game against the server
pub struct GameSession<T, I> {
    username: String,
    transport: T,
    knowledge: KnowledgeState,
    candidates: CandidateSource<I>,
    state: SessionState,
    session_id: Option<GameId>,
    history: Vec<GuessRecord>,
    guesses_sent: usize,
}

impl<T, I> GameSession<T, I>
where
    T: Transport,
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Create a session that has not yet said hello
    pub fn new(
        username: impl Into<String>,
        transport: T,
        candidates: CandidateSource<I>,
        pruning: Pruning,
    ) -> Self {
        Self {
            username: username.into(),
            transport,
            knowledge: KnowledgeState::new(pruning),
            candidates,
            state: SessionState::AwaitingStart,
            session_id: None,
            history: Vec::new(),
            guesses_sent: 0,
        }
    }

    /// Perform one transition
    ///
    /// Returns `false` once the session is `Done`; further calls do no I/O.
    pub fn step(&mut self) -> bool {
        let next = match &self.state {
            SessionState::AwaitingStart => self.start(),
            SessionState::Guessing { id } => {
                let id = id.clone();
                self.guess(&id)
            }
            SessionState::Done(_) => return false,
        };

        self.state = next.unwrap_or_else(|error| {
            warn!(kind = error.kind(), %error, "session failed");
            SessionState::Done(Outcome::Error(error))
        });
        !matches!(self.state, SessionState::Done(_))
    }

    /// Drive the session to completion
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::Word;
    /// use wordle_client::referee::LocalReferee;
    /// use wordle_client::session::GameSession;
    /// use wordle_client::solver::{CandidateSource, Pruning};
    ///
    /// let referee = LocalReferee::new(Word::new("float").unwrap());
    /// let candidates = CandidateSource::new(["crane", "slate", "float"]);
    ///
    /// let report = GameSession::new("student", referee, candidates, Pruning::Strict).run();
    /// assert!(report.outcome.is_success());
    /// ```
    pub fn run(mut self) -> SessionReport {
        loop {
            if let SessionState::Done(outcome) = self.state {
                return SessionReport {
                    session_id: self.session_id,
                    outcome,
                    history: self.history,
                    guesses_sent: self.guesses_sent,
                    candidates: self.candidates.stats(),
                };
            }
            self.step();
        }
    }

    fn start(&mut self) -> Result<SessionState, SessionError> {
        let hello = encode(&ClientMessage::hello(self.username.as_str()))?;
        self.send(&hello, "sending hello")?;

        let frame = self.receive("awaiting start")?;
        match decode(&frame) {
            ServerMessage::Started { id } => {
                info!(game = %id, "game started");
                self.session_id = Some(id.clone());
                Ok(SessionState::Guessing { id })
            }
            ServerMessage::Malformed { raw, reason } => {
                Err(ProtocolError::Malformed { raw, reason }.into())
            }
            other => Err(ProtocolError::Unexpected {
                expected: "awaiting start",
                received: other.kind(),
                raw: lossy(&frame),
            }
            .into()),
        }
    }

    fn guess(&mut self, id: &GameId) -> Result<SessionState, SessionError> {
        let Some(word) = self.candidates.next_accepted(&self.knowledge) else {
            return Err(SessionError::Exhausted {
                guesses: self.guesses_sent,
            });
        };

        let frame = encode(&ClientMessage::guess(id, word.text()))?;
        self.send(&frame, "sending a guess")?;
        self.guesses_sent += 1;
        debug!(guess = %word, number = self.guesses_sent, "guess sent");

        let reply = self.receive("awaiting feedback")?;
        match decode(&reply) {
            ServerMessage::Retry { id: echoed, guesses } => {
                check_id(id, echoed.as_ref(), &reply)?;
                let record = newest_feedback(guesses, &word, &reply)?;

                self.knowledge
                    .update(&record)
                    .map_err(|e| ProtocolError::Feedback {
                        reason: e.to_string(),
                        raw: lossy(&reply),
                    })?;

                debug!(
                    guess = %record.word,
                    marks = %record.marks,
                    confirmed = %self.knowledge.confirmed_pattern(),
                    "feedback applied"
                );
                self.history.push(record);
                Ok(SessionState::Guessing { id: id.clone() })
            }
            ServerMessage::Bye { id: echoed, flag } => {
                check_id(id, echoed.as_ref(), &reply)?;
                info!(guess = %word, guesses = self.guesses_sent, "game won");
                self.history.push(GuessRecord::new(word, Marks::SOLVED));
                Ok(SessionState::Done(Outcome::Success { flag }))
            }
            ServerMessage::Malformed { raw, reason } => {
                Err(ProtocolError::Malformed { raw, reason }.into())
            }
            other @ ServerMessage::Started { .. } => Err(ProtocolError::Unexpected {
                expected: "awaiting feedback",
                received: other.kind(),
                raw: lossy(&reply),
            }
            .into()),
        }
    }

    fn send(&mut self, frame: &[u8], action: &'static str) -> Result<(), SessionError> {
        trace!(frame = %lossy(frame).trim_end(), "send");
        self.transport
            .send(frame)
            .map_err(|source| SessionError::Transport { action, source })
    }

    fn receive(&mut self, action: &'static str) -> Result<Vec<u8>, SessionError> {
        let frame = self
            .transport
            .recv()
            .map_err(|source| SessionError::Transport { action, source })?;
        trace!(frame = %lossy(&frame), "recv");
        Ok(frame)
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeState {
        &self.knowledge
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn session_id(&self) -> Option<&GameId> {
        self.session_id.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

/// A reply may omit the id, but must not name a different game
fn check_id(expected: &GameId, echoed: Option<&GameId>, frame: &[u8]) -> Result<(), ProtocolError> {
    match echoed {
        Some(received) if received != expected => Err(ProtocolError::IdMismatch {
            expected: expected.clone(),
            received: received.clone(),
            raw: lossy(frame),
        }),
        _ => Ok(()),
    }
}

/// The last entry of a cumulative `retry` history, which must score `guessed`
fn newest_feedback(
    mut guesses: Vec<GuessRecord>,
    guessed: &Word,
    frame: &[u8],
) -> Result<GuessRecord, ProtocolError> {
    let Some(newest) = guesses.pop() else {
        return Err(ProtocolError::Feedback {
            reason: "retry carries no guesses".to_string(),
            raw: lossy(frame),
        });
    };

    if newest.word != *guessed {
        return Err(ProtocolError::Feedback {
            reason: format!(
                "newest guess is {:?}, expected {:?}",
                newest.word.text(),
                guessed.text()
            ),
            raw: lossy(frame),
        });
    }

    Ok(newest)
}

fn lossy(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ServerFrame, WireGuess};
    use std::collections::VecDeque;
    use std::io;

    /// Replays canned replies and records every frame sent
    #[derive(Default)]
    struct ScriptedTransport {
        replies: VecDeque<io::Result<Vec<u8>>>,
        sent: Vec<String>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                replies: replies.into(),
                sent: Vec::new(),
            }
        }

        fn sent_words(&self) -> Vec<String> {
            self.sent
                .iter()
                .filter_map(|frame| match crate::protocol::decode_client(frame.as_bytes()) {
                    Ok(ClientMessage::Guess { word, .. }) => Some(word),
                    _ => None,
                })
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&mut self, frame: &[u8]) -> io::Result<()> {
            self.sent.push(String::from_utf8(frame.to_vec()).unwrap());
            Ok(())
        }

        fn recv(&mut self) -> io::Result<Vec<u8>> {
            self.replies.pop_front().unwrap_or_else(|| {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "script ended"))
            })
        }
    }

    fn frame(message: &ServerFrame) -> io::Result<Vec<u8>> {
        Ok(encode(message).unwrap())
    }

    fn start(id: &str) -> io::Result<Vec<u8>> {
        frame(&ServerFrame::Start { id: GameId::new(id) })
    }

    fn retry(id: &str, history: &[(&str, [i64; 5])]) -> io::Result<Vec<u8>> {
        frame(&ServerFrame::Retry {
            id: Some(GameId::new(id)),
            guesses: history
                .iter()
                .map(|(word, marks)| WireGuess {
                    word: (*word).to_string(),
                    marks: marks.to_vec(),
                })
                .collect(),
        })
    }

    fn bye(id: &str, flag: &str) -> io::Result<Vec<u8>> {
        frame(&ServerFrame::Bye {
            id: Some(GameId::new(id)),
            flag: flag.to_string(),
        })
    }

    fn session<'a>(
        transport: ScriptedTransport,
        dictionary: &'a [&'a str],
        pruning: Pruning,
    ) -> GameSession<ScriptedTransport, std::slice::Iter<'a, &'a str>> {
        GameSession::new(
            "student",
            transport,
            CandidateSource::new(dictionary.iter()),
            pruning,
        )
    }

    fn expect_error(outcome: &Outcome) -> &SessionError {
        match outcome {
            Outcome::Error(error) => error,
            Outcome::Success { flag } => panic!("expected failure, got flag {flag}"),
        }
    }

    const NONE: [i64; 5] = [0, 0, 0, 0, 0];

    fn scenario_a_script() -> ScriptedTransport {
        ScriptedTransport::new(vec![
            start("g-1"),
            retry("g-1", &[("crane", NONE)]),
            retry("g-1", &[("crane", NONE), ("slate", NONE)]),
            bye("g-1", "FLAG{test}"),
        ])
    }

    #[test]
    fn hello_is_sent_first() {
        let mut game = session(
            ScriptedTransport::new(vec![start("g-1")]),
            &["crane"],
            Pruning::Strict,
        );

        assert!(game.step());
        assert_eq!(
            game.transport().sent,
            vec!["{\"type\":\"hello\",\"northeastern_username\":\"student\"}\n"]
        );
        assert_eq!(game.session_id(), Some(&GameId::new("g-1")));
        assert!(matches!(game.state(), SessionState::Guessing { .. }));
    }

    #[test]
    fn guesses_in_dictionary_order_until_bye() {
        // Every guess scored all-absent, yet the answer is the last word:
        // only meaningful when absent marks are not used for pruning
        let dictionary = ["crane", "slate", "float"];
        let mut game = session(scenario_a_script(), &dictionary, Pruning::PositionsOnly);
        while game.step() {}

        assert_eq!(game.transport().sent_words(), vec!["crane", "slate", "float"]);
        assert_eq!(
            game.transport().sent[1],
            "{\"type\":\"guess\",\"id\":\"g-1\",\"word\":\"crane\"}\n"
        );

        let report = game.run();
        assert_eq!(report.outcome.flag(), Some("FLAG{test}"));
        assert_eq!(report.guesses_sent, 3);
        assert_eq!(report.history.len(), 3);
        assert!(report.history[2].marks.is_solved());
    }

    #[test]
    fn strict_pruning_on_contradictory_feedback_exhausts() {
        let dictionary = ["crane", "slate", "float"];
        let mut game = session(scenario_a_script(), &dictionary, Pruning::Strict);
        while game.step() {}

        assert_eq!(game.transport().sent_words(), vec!["crane"]);
        let report = game.run();
        assert!(matches!(
            expect_error(&report.outcome),
            SessionError::Exhausted { guesses: 1 }
        ));
        assert_eq!(report.candidates.rejected, 2);
    }

    #[test]
    fn all_correct_retry_confirms_every_position() {
        let dictionary = ["apple", "maple", "apply", "apple"];
        let transport = ScriptedTransport::new(vec![
            start("g-7"),
            retry("g-7", &[("apple", [2, 2, 2, 2, 2])]),
            bye("g-7", "FLAG{b}"),
        ]);
        let mut game = session(transport, &dictionary, Pruning::Strict);

        assert!(game.step()); // start
        assert!(game.step()); // apple -> retry
        assert_eq!(
            game.knowledge().confirmed(),
            &[Some(b'a'), Some(b'p'), Some(b'p'), Some(b'l'), Some(b'e')]
        );

        assert!(!game.step()); // maple and apply skipped, apple again -> bye
        assert_eq!(game.transport().sent_words(), vec!["apple", "apple"]);
        assert_eq!(game.run().outcome.flag(), Some("FLAG{b}"));
    }

    #[test]
    fn transport_failure_while_awaiting_feedback_is_final() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")),
            bye("g-1", "never read"),
        ]);
        let mut game = session(transport, &["crane", "slate"], Pruning::Strict);

        assert!(game.step());
        assert!(!game.step());
        let sent_before = game.transport().sent.len();

        // Done is terminal: stepping again does no I/O
        assert!(!game.step());
        assert!(!game.step());
        assert_eq!(game.transport().sent.len(), sent_before);
        assert_eq!(game.transport().sent_words(), vec!["crane"]);

        let report = game.run();
        match expect_error(&report.outcome) {
            SessionError::Transport { action, source } => {
                assert_eq!(*action, "awaiting feedback");
                assert_eq!(source.kind(), io::ErrorKind::ConnectionReset);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
        assert_eq!(report.guesses_sent, 1);
    }

    #[test]
    fn connection_closed_before_start() {
        let game = session(ScriptedTransport::new(vec![]), &["crane"], Pruning::Strict);
        let report = game.run();

        assert_eq!(expect_error(&report.outcome).kind(), "transport");
        assert!(report.session_id.is_none());
        assert_eq!(report.guesses_sent, 0);
    }

    #[test]
    fn malformed_reply_is_fatal_and_keeps_raw_text() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            Ok(b"{\"type\":\"retry\",\"id\":\"g-1\"".to_vec()),
        ]);
        let report = session(transport, &["crane", "slate"], Pruning::Strict).run();

        match expect_error(&report.outcome) {
            SessionError::Protocol(ProtocolError::Malformed { raw, .. }) => {
                assert_eq!(raw, "{\"type\":\"retry\",\"id\":\"g-1\"");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
        assert_eq!(report.guesses_sent, 1);
    }

    #[test]
    fn out_of_range_marks_are_protocol_errors() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            retry("g-1", &[("crane", [0, 0, 3, 0, 0])]),
        ]);
        let report = session(transport, &["crane", "slate"], Pruning::Strict).run();

        assert_eq!(expect_error(&report.outcome).kind(), "protocol");
        assert!(report.history.is_empty());
    }

    #[test]
    fn retry_before_start_is_unexpected() {
        let transport = ScriptedTransport::new(vec![retry("g-1", &[("crane", NONE)])]);
        let report = session(transport, &["crane"], Pruning::Strict).run();

        match expect_error(&report.outcome) {
            SessionError::Protocol(ProtocolError::Unexpected {
                expected, received, raw,
            }) => {
                assert_eq!(*expected, "awaiting start");
                assert_eq!(*received, "retry");
                assert!(raw.contains("\"crane\""));
            }
            other => panic!("expected unexpected-message error, got {other:?}"),
        }
    }

    #[test]
    fn second_start_is_unexpected() {
        let transport = ScriptedTransport::new(vec![start("g-1"), start("g-2")]);
        let report = session(transport, &["crane"], Pruning::Strict).run();

        assert!(matches!(
            expect_error(&report.outcome),
            SessionError::Protocol(ProtocolError::Unexpected {
                received: "start",
                ..
            })
        ));
    }

    #[test]
    fn reply_for_another_game_is_rejected() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            retry("g-2", &[("crane", NONE)]),
        ]);
        let report = session(transport, &["crane", "bulky"], Pruning::Strict).run();

        assert!(matches!(
            expect_error(&report.outcome),
            SessionError::Protocol(ProtocolError::IdMismatch { .. })
        ));
    }

    #[test]
    fn retry_must_score_the_word_just_guessed() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            retry("g-1", &[("slate", NONE)]),
        ]);
        let report = session(transport, &["crane", "bulky"], Pruning::Strict).run();

        match expect_error(&report.outcome) {
            SessionError::Protocol(ProtocolError::Feedback { reason, .. }) => {
                assert!(reason.contains("\"slate\""));
            }
            other => panic!("expected feedback error, got {other:?}"),
        }
    }

    #[test]
    fn empty_retry_history_is_rejected() {
        let transport = ScriptedTransport::new(vec![start("g-1"), retry("g-1", &[])]);
        let report = session(transport, &["crane"], Pruning::Strict).run();

        assert!(matches!(
            expect_error(&report.outcome),
            SessionError::Protocol(ProtocolError::Feedback { .. })
        ));
    }

    #[test]
    fn only_newest_history_entry_is_applied() {
        // The repeated crane entry disagrees with the first reply; re-applying
        // it would pin 'c' to the first position
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            retry("g-1", &[("crane", NONE)]),
            retry("g-1", &[("crane", [2, 0, 0, 0, 0]), ("bulky", NONE)]),
        ]);
        let mut game = session(transport, &["crane", "bulky", "moist"], Pruning::Strict);
        for _ in 0..3 {
            game.step();
        }

        assert!(matches!(game.state(), SessionState::Guessing { .. }));
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[1].word.text(), "bulky");
        assert_eq!(game.knowledge().confirmed()[0], None);
        assert!(game.knowledge().is_excluded(b'y'));
    }

    #[test]
    fn empty_dictionary_exhausts_without_guessing() {
        let transport = ScriptedTransport::new(vec![start("g-1")]);
        let mut game = session(transport, &["", "nope", "toolong"], Pruning::Strict);
        while game.step() {}

        assert_eq!(game.transport().sent.len(), 1); // hello only
        let report = game.run();
        assert!(matches!(
            expect_error(&report.outcome),
            SessionError::Exhausted { guesses: 0 }
        ));
        assert_eq!(report.candidates.malformed, 3);
    }

    #[test]
    fn bye_without_id_is_accepted() {
        let transport = ScriptedTransport::new(vec![
            start("g-1"),
            Ok(b"{\"type\":\"bye\",\"flag\":\"abc\"}".to_vec()),
        ]);
        let report = session(transport, &["crane"], Pruning::Strict).run();
        assert_eq!(report.outcome.flag(), Some("abc"));
        assert_eq!(report.session_id, Some(GameId::new("g-1")));
    }
}
