//! Embedded dictionary
//!
//! Compiled into the binary from `data/word_list.txt` at build time.

include!(concat!(env!("OUT_DIR"), "/dictionary.rs"));
