//! Newline framing over any byte stream

use super::Transport;
use std::io::{self, BufRead, BufReader, Read, Write};

/// Upper bound on a single incoming frame, newline excluded
///
/// `retry` messages repeat the whole guess history, so frames grow with the
/// game, but never anywhere near this.
pub const MAX_FRAME_LEN: usize = 1 << 20;

/// [`Transport`] over a stream, framing messages on `\n`
///
/// Plain TCP and TLS both use this type; only the stream differs.
pub struct LineTransport<S: Read + Write> {
    reader: BufReader<S>,
}

impl<S: Read + Write> LineTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::new(stream),
        }
    }

    /// The underlying stream
    #[must_use]
    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }
}

impl<S: Read + Write> Transport for LineTransport<S> {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        let stream = self.reader.get_mut();
        stream.write_all(frame)?;
        stream.flush()
    }

    fn recv(&mut self) -> io::Result<Vec<u8>> {
        let mut frame = Vec::new();
        let limit = MAX_FRAME_LEN as u64 + 1;
        let read = self
            .reader
            .by_ref()
            .take(limit)
            .read_until(b'\n', &mut frame)?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed by server",
            ));
        }

        if frame.pop() != Some(b'\n') {
            return Err(if frame.len() >= MAX_FRAME_LEN {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("frame exceeds {MAX_FRAME_LEN} bytes without a newline"),
                )
            } else {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed in the middle of a message",
                )
            });
        }

        Ok(frame)
    }
}
