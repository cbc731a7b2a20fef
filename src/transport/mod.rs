//! Byte transport to the game server
//!
//! The session only ever sees [`Transport`]: send one frame, receive one frame.
//! Whether the bytes travel over plain TCP or TLS is decided once, in
//! [`connect`], and never again.

mod connect;
mod line;
mod tls;

use std::io;

pub use connect::{ConnectError, ConnectOptions, PLAIN_PORT, TLS_PORT, connect};
pub use line::{LineTransport, MAX_FRAME_LEN};
pub use tls::TlsStream;

/// A duplex, newline-framed message channel
pub trait Transport {
    /// Write one complete frame (including its trailing newline)
    ///
    /// # Errors
    /// Returns any I/O error from the underlying stream. Nothing is retried.
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Block until one complete frame arrives, returned without its newline
    ///
    /// # Errors
    /// Returns `UnexpectedEof` when the peer closes the stream, or any I/O
    /// error (including timeouts) from the underlying stream.
    fn recv(&mut self) -> io::Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).send(frame)
    }

    fn recv(&mut self) -> io::Result<Vec<u8>> {
        (**self).recv()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).send(frame)
    }

    fn recv(&mut self) -> io::Result<Vec<u8>> {
        (**self).recv()
    }
}
