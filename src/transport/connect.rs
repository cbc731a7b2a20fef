//! Connection setup: resolve, connect, optionally wrap in TLS

use super::line::LineTransport;
use super::{Transport, tls};
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default port for unencrypted connections
pub const PLAIN_PORT: u16 = 27993;

/// Default port for TLS connections
pub const TLS_PORT: u16 = 27994;

/// Errors raised before the first message is exchanged
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("could not resolve {host}:{port}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{host}:{port} resolved to no addresses")]
    NoAddress { host: String, port: u16 },

    #[error("could not connect to {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{0:?} is not a valid TLS server name")]
    ServerName(String),

    #[error("TLS configuration failed")]
    Tls(#[from] rustls::Error),

    #[error("TLS handshake with {host} failed")]
    Handshake {
        host: String,
        #[source]
        source: io::Error,
    },
}

/// Where and how to connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    /// Applied to connect, read and write; `None` blocks indefinitely
    pub timeout: Option<Duration>,
}

impl ConnectOptions {
    /// Options for `host`, on the default port for the chosen encryption
    ///
    /// # Examples
    /// ```
    /// use wordle_client::transport::{ConnectOptions, TLS_PORT};
    ///
    /// let options = ConnectOptions::new("localhost", true);
    /// assert_eq!(options.port, TLS_PORT);
    /// ```
    #[must_use]
    pub fn new(host: impl Into<String>, tls: bool) -> Self {
        Self {
            host: host.into(),
            port: if tls { TLS_PORT } else { PLAIN_PORT },
            tls,
            timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Override the port; `None` keeps the default
    #[must_use]
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Open a transport to the server described by `options`
///
/// This is the only place that distinguishes plain TCP from TLS.
///
/// # Errors
/// Returns `ConnectError` if the host cannot be resolved or reached, or if the
/// TLS handshake fails.
pub fn connect(options: &ConnectOptions) -> Result<Box<dyn Transport>, ConnectError> {
    let stream = open_tcp(options)?;

    if options.tls {
        let stream = tls::wrap(stream, &options.host)?;
        info!(host = %options.host, port = options.port, "connected (TLS)");
        Ok(Box::new(LineTransport::new(stream)))
    } else {
        info!(host = %options.host, port = options.port, "connected");
        Ok(Box::new(LineTransport::new(stream)))
    }
}

fn open_tcp(options: &ConnectOptions) -> Result<TcpStream, ConnectError> {
    let ConnectOptions {
        host,
        port,
        timeout,
        ..
    } = options;

    let addrs: Vec<SocketAddr> = (host.as_str(), *port)
        .to_socket_addrs()
        .map_err(|source| ConnectError::Resolve {
            host: host.clone(),
            port: *port,
            source,
        })?
        .collect();

    let mut last_error = None;
    for addr in addrs {
        debug!(%addr, "connecting");
        let attempt = match timeout {
            Some(limit) => TcpStream::connect_timeout(&addr, *limit),
            None => TcpStream::connect(addr),
        };

        match attempt.and_then(|stream| configure(stream, *timeout)) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                warn!(%addr, error = %e, "connection attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(source) => ConnectError::Connect {
            host: host.clone(),
            port: *port,
            source,
        },
        None => ConnectError::NoAddress {
            host: host.clone(),
            port: *port,
        },
    })
}

fn configure(stream: TcpStream, timeout: Option<Duration>) -> io::Result<TcpStream> {
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;
    stream.set_nodelay(true)?;
    Ok(stream)
}
