//! Dictionaries
//!
//! The embedded dictionary is compiled into the binary; any other dictionary
//! is a file streamed lazily in file order.

mod embedded;
pub mod loader;

pub use embedded::{DICTIONARY, DICTIONARY_COUNT};

use std::io;
use std::path::PathBuf;

/// Where dictionary entries come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wordlist {
    Embedded,
    File(PathBuf),
}

impl Wordlist {
    /// Parse a `-w` argument: `embedded` or a file path
    ///
    /// # Examples
    /// ```
    /// use wordle_client::wordlists::Wordlist;
    ///
    /// assert_eq!(Wordlist::from_arg("embedded"), Wordlist::Embedded);
    /// assert!(matches!(Wordlist::from_arg("words.txt"), Wordlist::File(_)));
    /// ```
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "embedded" => Self::Embedded,
            path => Self::File(PathBuf::from(path)),
        }
    }

    /// Open the dictionary as a lazy stream of raw entries
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a dictionary file cannot be opened.
    pub fn entries(&self) -> io::Result<Box<dyn Iterator<Item = String>>> {
        match self {
            Self::Embedded => Ok(Box::new(loader::from_slice(DICTIONARY))),
            Self::File(path) => Ok(Box::new(loader::stream_lines(path.clone())?)),
        }
    }
}
