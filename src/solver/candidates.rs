//! Lazy candidate sequence over a dictionary

use super::knowledge::KnowledgeState;
use crate::core::Word;

/// Counters describing how much of the dictionary has been consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateStats {
    /// Well-formed words tested against the knowledge state
    pub examined: usize,
    /// Words skipped because the knowledge state ruled them out
    pub rejected: usize,
    /// Dictionary entries skipped because they are not valid words
    pub malformed: usize,
}

/// Single-pass, dictionary-ordered source of candidate words
///
/// Entries are validated and filtered as they are pulled, so the knowledge state
/// in effect at each pull decides what comes out. Once exhausted it stays exhausted.
pub struct CandidateSource<I> {
    entries: I,
    stats: CandidateStats,
}

impl<I> CandidateSource<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Create a source over dictionary entries in their original order
    ///
    /// # Examples
    /// ```
    /// use wordle_client::solver::{CandidateSource, KnowledgeState};
    ///
    /// let mut source = CandidateSource::new(["crane", "oops", "slate"]);
    /// let knowledge = KnowledgeState::default();
    ///
    /// assert_eq!(source.next_accepted(&knowledge).unwrap().text(), "crane");
    /// assert_eq!(source.next_accepted(&knowledge).unwrap().text(), "slate");
    /// assert!(source.next_accepted(&knowledge).is_none());
    /// assert_eq!(source.stats().malformed, 1);
    /// ```
    pub fn new<E>(entries: E) -> Self
    where
        E: IntoIterator<IntoIter = I>,
    {
        Self {
            entries: entries.into_iter(),
            stats: CandidateStats::default(),
        }
    }

    /// Pull the next word the knowledge state accepts
    ///
    /// Returns `None` once the dictionary is exhausted.
    pub fn next_accepted(&mut self, knowledge: &KnowledgeState) -> Option<Word> {
        for entry in self.entries.by_ref() {
            let Ok(word) = Word::new(entry.as_ref().trim()) else {
                self.stats.malformed += 1;
                continue;
            };

            self.stats.examined += 1;
            if knowledge.accepts(&word) {
                return Some(word);
            }
            self.stats.rejected += 1;
        }
        None
    }

    #[inline]
    #[must_use]
    pub const fn stats(&self) -> CandidateStats {
        self.stats
    }
}
