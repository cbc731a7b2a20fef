//! Wordle Client
//!
//! A client for a networked Wordle-style game. It guesses dictionary words in
//! order, skipping any the server's feedback has ruled out, until the server
//! answers with a flag.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_client::core::Word;
//! use wordle_client::referee::LocalReferee;
//! use wordle_client::session::GameSession;
//! use wordle_client::solver::{CandidateSource, Pruning};
//! use wordle_client::wordlists::DICTIONARY;
//!
//! // Play against an in-process referee instead of a real server
//! let referee = LocalReferee::new(Word::new("slate").unwrap());
//! let candidates = CandidateSource::new(DICTIONARY.iter());
//!
//! let report = GameSession::new("alice", referee, candidates, Pruning::Strict).run();
//! assert_eq!(report.outcome.flag(), Some("FLAG{slate}"));
//! ```

// Core domain types
pub mod core;

// Feedback knowledge and candidate filtering
pub mod solver;

// Wire messages and codec
pub mod protocol;

// TCP and TLS byte transport
pub mod transport;

// Game state machine
pub mod session;

// In-process game server
pub mod referee;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
