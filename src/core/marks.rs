//! Per-letter feedback as reported by the game server
//!
//! Each letter of a guess is marked with one of three codes:
//! - 0 = Absent (letter not in word)
//! - 1 = Present (letter in word, wrong position)
//! - 2 = Correct (letter in correct position)

use super::word::{WORD_LENGTH, Word};
use std::fmt;

/// Feedback for a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Absent,
    Present,
    Correct,
}

impl Mark {
    /// Wire value of this mark
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

impl TryFrom<i64> for Mark {
    type Error = MarksError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Present),
            2 => Ok(Self::Correct),
            other => Err(MarksError::OutOfRange(other)),
        }
    }
}

/// Error type for feedback vectors that cannot be applied to a word
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarksError {
    #[error("expected {WORD_LENGTH} marks, got {0}")]
    WrongLength(usize),
    #[error("mark value {0} is outside 0..=2")]
    OutOfRange(i64),
}

/// Feedback for a whole guess, one mark per letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marks([Mark; WORD_LENGTH]);

impl Marks {
    /// All letters correct
    pub const SOLVED: Self = Self([Mark::Correct; WORD_LENGTH]);

    /// All letters absent
    pub const NONE: Self = Self([Mark::Absent; WORD_LENGTH]);

    #[inline]
    #[must_use]
    pub const fn new(marks: [Mark; WORD_LENGTH]) -> Self {
        Self(marks)
    }

    /// Build marks from the raw integers found on the wire
    ///
    /// # Errors
    /// Returns `MarksError::WrongLength` if the slice does not hold exactly
    /// [`WORD_LENGTH`] values, or `MarksError::OutOfRange` for any value
    /// other than 0, 1 or 2.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::{Mark, Marks};
    ///
    /// let marks = Marks::from_values(&[2, 1, 0, 0, 2]).unwrap();
    /// assert_eq!(marks.get(1), Mark::Present);
    ///
    /// assert!(Marks::from_values(&[2, 2, 2]).is_err());
    /// assert!(Marks::from_values(&[0, 0, 3, 0, 0]).is_err());
    /// ```
    pub fn from_values(values: &[i64]) -> Result<Self, MarksError> {
        if values.len() != WORD_LENGTH {
            return Err(MarksError::WrongLength(values.len()));
        }

        let mut marks = [Mark::Absent; WORD_LENGTH];
        for (slot, &value) in marks.iter_mut().zip(values) {
            *slot = Mark::try_from(value)?;
        }
        Ok(Self(marks))
    }

    /// Mark at a specific position
    ///
    /// # Panics
    /// Panics if `position >= WORD_LENGTH`
    #[inline]
    #[must_use]
    pub const fn get(&self, position: usize) -> Mark {
        self.0[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = Mark> + '_ {
        self.0.iter().copied()
    }

    /// Wire values, in position order
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.0.iter().map(|mark| i64::from(mark.value())).collect()
    }

    /// Check if every letter is correct
    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Compute the marks the server would return when `guess` is played against `answer`
    ///
    /// Duplicate letters follow the usual rules:
    /// 1. First pass: mark exact matches and remove them from the available pool
    /// 2. Second pass: mark present-but-misplaced letters from what remains
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::{Marks, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    ///
    /// let marks = Marks::score(&guess, &answer);
    /// assert_eq!(marks.values(), vec![0, 0, 2, 0, 2]);
    /// ```
    #[must_use]
    pub fn score(guess: &Word, answer: &Word) -> Self {
        let mut result = [Mark::Absent; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        // Allow: Index needed to access guess[i], answer[i], and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess.char_at(i) == answer.char_at(i) {
                result[i] = Mark::Correct;

                if let Some(count) = answer_available.get_mut(&guess.char_at(i)) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Allow: Index needed to access guess[i] and check/set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == Mark::Absent
                && let Some(count) = answer_available.get_mut(&guess.char_at(i))
                && *count > 0
            {
                result[i] = Mark::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Convert marks to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|mark| mark.to_emoji()).collect()
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            write!(f, "{}", mark.value())?;
        }
        Ok(())
    }
}

/// One guess together with the feedback the server gave for it
///
/// Consumed into the knowledge state; the session keeps the list only for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub word: Word,
    pub marks: Marks,
}

impl GuessRecord {
    #[must_use]
    pub const fn new(word: Word, marks: Marks) -> Self {
        Self { word, marks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn mark_from_wire_values() {
        assert_eq!(Mark::try_from(0), Ok(Mark::Absent));
        assert_eq!(Mark::try_from(1), Ok(Mark::Present));
        assert_eq!(Mark::try_from(2), Ok(Mark::Correct));
        assert_eq!(Mark::try_from(3), Err(MarksError::OutOfRange(3)));
        assert_eq!(Mark::try_from(-1), Err(MarksError::OutOfRange(-1)));
    }

    #[test]
    fn marks_from_values_wrong_length() {
        assert_eq!(
            Marks::from_values(&[0, 0, 0, 0]),
            Err(MarksError::WrongLength(4))
        );
        assert_eq!(
            Marks::from_values(&[0, 0, 0, 0, 0, 0]),
            Err(MarksError::WrongLength(6))
        );
        assert_eq!(Marks::from_values(&[]), Err(MarksError::WrongLength(0)));
    }

    #[test]
    fn marks_values_roundtrip_wire_order() {
        let marks = Marks::from_values(&[2, 1, 0, 1, 2]).unwrap();
        assert_eq!(marks.values(), vec![2, 1, 0, 1, 2]);
        assert_eq!(marks.to_string(), "21012");
    }

    #[test]
    fn score_all_absent() {
        let marks = Marks::score(&word("crane"), &word("bulky"));
        assert_eq!(marks, Marks::NONE);
    }

    #[test]
    fn score_all_correct() {
        let marks = Marks::score(&word("float"), &word("float"));
        assert!(marks.is_solved());
    }

    #[test]
    fn score_duplicate_letters_green_takes_priority() {
        // SPEED vs SPEND: second E has no E left in the pool
        let marks = Marks::score(&word("speed"), &word("spend"));
        assert_eq!(marks.values(), vec![2, 2, 2, 0, 2]);
    }

    #[test]
    fn score_duplicate_letters_yellow_then_gray() {
        // ROBOT vs FLOOR
        let marks = Marks::score(&word("robot"), &word("floor"));
        assert_eq!(marks.values(), vec![1, 1, 0, 2, 0]);
    }

    #[test]
    fn emoji_rendering() {
        let marks = Marks::from_values(&[2, 1, 0, 2, 1]).unwrap();
        assert_eq!(marks.to_emoji(), "🟩🟨⬜🟩🟨");
    }
}
