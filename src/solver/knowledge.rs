//! Accumulated letter knowledge
//!
//! Feedback from every scored guess is folded into three constraint sets:
//! confirmed letters per position, letters absent from the answer, and letters
//! known to be present but ruled out at particular positions. All three only
//! ever grow.

use crate::core::{GuessRecord, Mark, WORD_LENGTH, Word};
use rustc_hash::{FxHashMap, FxHashSet};

/// How much of the server's feedback is used to prune candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// Apply absent, present and correct marks
    #[default]
    Strict,
    /// Apply correct marks only, ignoring absent and present ones
    PositionsOnly,
}

impl Pruning {
    /// Create a pruning policy from its command-line name
    ///
    /// Supported names: "strict", "positions-only"
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::Strict),
            "positions-only" | "positions" => Some(Self::PositionsOnly),
            _ => None,
        }
    }
}

/// Feedback that cannot be reconciled with what is already known
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnowledgeError {
    #[error(
        "position {position} already confirmed as '{known}' but feedback confirms '{reported}'"
    )]
    Contradiction {
        position: usize,
        known: char,
        reported: char,
    },
}

/// Constraints learned from feedback so far
#[derive(Debug, Clone, Default)]
pub struct KnowledgeState {
    pruning: Pruning,
    confirmed: [Option<u8>; WORD_LENGTH],
    excluded: FxHashSet<u8>,
    /// Letters known to be in the answer, with the positions they are ruled out of
    misplaced: FxHashMap<u8, [bool; WORD_LENGTH]>,
}

impl KnowledgeState {
    #[must_use]
    pub fn new(pruning: Pruning) -> Self {
        Self {
            pruning,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub const fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Fold one scored guess into the constraints
    ///
    /// Either the whole record is applied or, on error, nothing is.
    ///
    /// # Errors
    /// Returns `KnowledgeError::Contradiction` if a correct mark names a different
    /// letter than the one already confirmed at that position.
    pub fn update(&mut self, record: &GuessRecord) -> Result<(), KnowledgeError> {
        let GuessRecord { word, marks } = record;

        for (position, mark) in marks.iter().enumerate() {
            let letter = word.char_at(position);
            if mark == Mark::Correct
                && let Some(known) = self.confirmed[position]
                && known != letter
            {
                return Err(KnowledgeError::Contradiction {
                    position,
                    known: char::from(known),
                    reported: char::from(letter),
                });
            }
        }

        // A letter marked absent is only absent everywhere if this guess
        // doesn't also place it (the answer holds fewer copies than the guess).
        let placed: FxHashSet<u8> = marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| *mark != Mark::Absent)
            .map(|(position, _)| word.char_at(position))
            .collect();

        for (position, mark) in marks.iter().enumerate() {
            let letter = word.char_at(position);
            match (mark, self.pruning) {
                (Mark::Correct, _) => self.confirmed[position] = Some(letter),
                (_, Pruning::PositionsOnly) => {}
                (Mark::Present, Pruning::Strict) => self.rule_out(letter, position),
                (Mark::Absent, Pruning::Strict) => {
                    if placed.contains(&letter) || self.is_known_present(letter) {
                        self.rule_out(letter, position);
                    } else {
                        self.excluded.insert(letter);
                    }
                }
            }
        }

        Ok(())
    }

    fn rule_out(&mut self, letter: u8, position: usize) {
        self.misplaced.entry(letter).or_default()[position] = true;
    }

    fn is_known_present(&self, letter: u8) -> bool {
        self.confirmed.contains(&Some(letter)) || self.misplaced.contains_key(&letter)
    }

    /// Check whether a candidate is consistent with every constraint
    ///
    /// Pure: repeated calls with the same word give the same answer until the next `update`.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::{GuessRecord, Marks, Word};
    /// use wordle_client::solver::KnowledgeState;
    ///
    /// let mut knowledge = KnowledgeState::default();
    /// let guess = Word::new("crane").unwrap();
    /// let marks = Marks::from_values(&[0, 0, 2, 0, 2]).unwrap();
    /// knowledge.update(&GuessRecord::new(guess, marks)).unwrap();
    ///
    /// assert!(knowledge.accepts(&Word::new("slate").unwrap()));
    /// assert!(!knowledge.accepts(&Word::new("crate").unwrap()));
    /// ```
    #[must_use]
    pub fn accepts(&self, candidate: &Word) -> bool {
        let fits_confirmed = self
            .confirmed
            .iter()
            .zip(candidate.chars())
            .all(|(known, &letter)| known.is_none_or(|known| known == letter));
        if !fits_confirmed {
            return false;
        }

        if candidate
            .chars()
            .iter()
            .any(|letter| self.excluded.contains(letter))
        {
            return false;
        }

        self.misplaced.iter().all(|(&letter, ruled_out)| {
            let positions = candidate.positions_of(letter);
            !positions.is_empty() && positions.iter().all(|&p| !ruled_out[p])
        })
    }

    /// Letters confirmed at each position
    #[inline]
    #[must_use]
    pub const fn confirmed(&self) -> &[Option<u8>; WORD_LENGTH] {
        &self.confirmed
    }

    /// Check whether a letter is known to be absent from the answer
    #[inline]
    #[must_use]
    pub fn is_excluded(&self, letter: u8) -> bool {
        self.excluded.contains(&letter)
    }

    /// Positions a present letter has been ruled out of, in ascending order
    ///
    /// Returns an empty vector if nothing is known about the letter's placement.
    #[must_use]
    pub fn misplaced_positions(&self, letter: u8) -> Vec<usize> {
        self.misplaced.get(&letter).map_or_else(Vec::new, |ruled_out| {
            (0..WORD_LENGTH).filter(|&p| ruled_out[p]).collect()
        })
    }

    /// Confirmed letters rendered as a template like "ap_l_"
    #[must_use]
    pub fn confirmed_pattern(&self) -> String {
        self.confirmed
            .iter()
            .map(|known| known.map_or('_', char::from))
            .collect()
    }

    /// Number of letters known to be absent
    #[inline]
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}
