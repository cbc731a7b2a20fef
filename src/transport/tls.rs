//! TLS client setup

use super::connect::ConnectError;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::net::TcpStream;
use std::sync::Arc;
use tracing::debug;

/// An established TLS session over TCP
pub type TlsStream = StreamOwned<ClientConnection, TcpStream>;

fn client_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Wrap a connected socket in TLS and finish the handshake
///
/// The handshake is driven to completion here so certificate and protocol
/// failures surface as connection errors rather than on the first guess.
pub(super) fn wrap(stream: TcpStream, host: &str) -> Result<TlsStream, ConnectError> {
    let name = ServerName::try_from(host.to_string())
        .map_err(|_| ConnectError::ServerName(host.to_string()))?;
    let connection = ClientConnection::new(client_config()?, name)?;
    let mut tls = StreamOwned::new(connection, stream);

    while tls.conn.is_handshaking() {
        tls.conn
            .complete_io(&mut tls.sock)
            .map_err(|source| ConnectError::Handshake {
                host: host.to_string(),
                source,
            })?;
    }

    debug!(
        host,
        version = ?tls.conn.protocol_version(),
        cipher = ?tls.conn.negotiated_cipher_suite().map(|suite| suite.suite()),
        "TLS handshake complete"
    );
    Ok(tls)
}
