//! Core domain types for the guessing game
//!
//! This module contains the fundamental domain types with no I/O.
//! All types here are pure, testable, and shared by the solver, protocol and referee.

mod marks;
mod word;

pub use marks::{GuessRecord, Mark, Marks, MarksError};
pub use word::{WORD_LENGTH, Word, WordError};
