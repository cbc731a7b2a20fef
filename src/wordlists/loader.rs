//! Dictionary file streaming

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Stream a dictionary file one line at a time, in file order
///
/// Only opening the file is checked up front. Lines are read as they are
/// pulled, so a large dictionary is never held in memory. A read error part
/// way through is logged and ends the stream early, the same as end of file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened.
///
/// # Examples
/// ```no_run
/// use wordle_client::wordlists::loader::stream_lines;
///
/// let first = stream_lines("data/word_list.txt").unwrap().next();
/// println!("first entry: {first:?}");
/// ```
pub fn stream_lines<P: AsRef<Path>>(path: P) -> io::Result<impl Iterator<Item = String>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let shown = path.display().to_string();

    Ok(BufReader::new(file)
        .lines()
        .map_while(move |line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(path = %shown, error = %e, "dictionary read failed; treating as end of list");
                None
            }
        }))
}

/// Borrow an embedded word slice as owned entries
///
/// # Examples
/// ```
/// use wordle_client::wordlists::{DICTIONARY, loader::from_slice};
///
/// assert_eq!(from_slice(DICTIONARY).count(), DICTIONARY.len());
/// ```
pub fn from_slice(slice: &'static [&'static str]) -> impl Iterator<Item = String> {
    slice.iter().map(|&word| word.to_string())
}
