// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: transport.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Plain TCP or TLS byte streams towards a probe target.
//!
//! TLS connections skip certificate validation unless
//! [`ProbeConfig::verify_peer_certificate`] is set. This is a trust
//! boundary: the fingerprint only needs the header bytes, not an
//! authenticated peer, so self-signed or expired endpoints must still be
//! reachable. Nothing else should reuse an unverified connection.

use crate::hhh::config::ProbeConfig;
use crate::hhh::error::{HhhError, Result};
use crate::hhh::target::Target;
use log::{debug, info, warn};
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{
	Certificate, ClientConfig, ClientConnection, OwnedTrustAnchor,
	RootCertStore, ServerName, StreamOwned,
};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::SystemTime;

/// Certificate verifier that accepts every chain. Handshake signatures
/// are still checked by rustls, only the chain of trust is ignored.
struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
	fn verify_server_cert(
		&self,
		_end_entity: &Certificate,
		_intermediates: &[Certificate],
		_server_name: &ServerName,
		_scts: &mut dyn Iterator<Item = &[u8]>,
		_ocsp_response: &[u8],
		_now: SystemTime,
	) -> std::result::Result<ServerCertVerified, rustls::Error> {
		Ok(ServerCertVerified::assertion())
	}
}

/// An open connection to the target. Dropping it closes the socket.
pub enum Connection {
	Plain(TcpStream),
	Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Connection {
	pub fn is_encrypted(&self) -> bool {
		matches!(self, Self::Tls(_))
	}

	/// Best-effort orderly close; the socket is released on drop either way.
	pub fn close(mut self) {
		if let Self::Tls(stream) = &mut self {
			stream.conn.send_close_notify();
			let _ = stream.conn.complete_io(&mut stream.sock);
		}
		let _ = self.socket().shutdown(Shutdown::Both);
	}

	fn socket(&self) -> &TcpStream {
		match self {
			Self::Plain(sock) => sock,
			Self::Tls(stream) => &stream.sock,
		}
	}
}

impl Read for Connection {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Self::Plain(sock) => sock.read(buf),
			Self::Tls(stream) => stream.read(buf),
		}
	}
}

impl Write for Connection {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		match self {
			Self::Plain(sock) => sock.write(buf),
			Self::Tls(stream) => stream.write(buf),
		}
	}

	fn flush(&mut self) -> io::Result<()> {
		match self {
			Self::Plain(sock) => sock.flush(),
			Self::Tls(stream) => stream.flush(),
		}
	}
}

pub fn tls_client_config(verify_peer_certificate: bool) -> Arc<ClientConfig> {
	let builder = ClientConfig::builder().with_safe_defaults();
	let config = if verify_peer_certificate {
		let mut root_store = RootCertStore::empty();
		root_store.add_trust_anchors(
			webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
				OwnedTrustAnchor::from_subject_spki_name_constraints(
					ta.subject,
					ta.spki,
					ta.name_constraints,
				)
			}),
		);
		builder
			.with_root_certificates(root_store)
			.with_no_client_auth()
	} else {
		builder
			.with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
			.with_no_client_auth()
	};
	Arc::new(config)
}

fn resolve(target: &Target) -> Result<Vec<SocketAddr>> {
	let addrs: Vec<SocketAddr> = (target.host.as_str(), target.port)
		.to_socket_addrs()
		.map_err(|source| HhhError::Resolve {
			host: target.host.clone(),
			port: target.port,
			source,
		})?
		.collect();
	if addrs.is_empty() {
		return Err(HhhError::Resolve {
			host: target.host.clone(),
			port: target.port,
			source: io::Error::new(
				io::ErrorKind::NotFound,
				"no addresses found",
			),
		});
	}
	debug!("{} resolved to {:?}", target.host, addrs);
	Ok(addrs)
}

fn connect_tcp(target: &Target, config: &ProbeConfig) -> Result<TcpStream> {
	let mut last_error = None;
	for addr in resolve(target)? {
		let attempt = match config.connect_timeout {
			Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
			None => TcpStream::connect(addr),
		};
		match attempt {
			Ok(sock) => {
				info!("connected to {}", addr);
				return Ok(sock);
			}
			Err(e) => {
				debug!("connect to {} failed: {}", addr, e);
				last_error = Some(e);
			}
		}
	}
	Err(HhhError::Connect {
		host: target.host.clone(),
		port: target.port,
		source: last_error.unwrap_or_else(|| {
			io::Error::new(io::ErrorKind::NotConnected, "no address tried")
		}),
	})
}

fn handshake(
	target: &Target,
	mut sock: TcpStream,
	config: &ProbeConfig,
) -> Result<Connection> {
	let server_name = ServerName::try_from(target.host.as_str())
		.map_err(|_| HhhError::TlsServerName {
			host: target.host.clone(),
		})?;
	let tls_config = tls_client_config(config.verify_peer_certificate);
	info!(
		"starting TLS handshake with {} (certificate verification {})",
		target.host,
		if config.verify_peer_certificate {
			"enabled"
		} else {
			"disabled"
		}
	);

	let mut conn = ClientConnection::new(tls_config, server_name)
		.map_err(|e| HhhError::TlsHandshake {
			host: target.host.clone(),
			source: io::Error::new(io::ErrorKind::Other, e),
		})?;
	while conn.is_handshaking() {
		conn.complete_io(&mut sock).map_err(|source| {
			HhhError::TlsHandshake {
				host: target.host.clone(),
				source,
			}
		})?;
	}
	Ok(Connection::Tls(Box::new(StreamOwned::new(conn, sock))))
}

/// Opens the byte stream for `target`, wrapping it in TLS for https.
pub fn connect(target: &Target, config: &ProbeConfig) -> Result<Connection> {
	let sock = connect_tcp(target, config)?;
	for (label, result) in [
		("read", sock.set_read_timeout(config.read_timeout)),
		("write", sock.set_write_timeout(config.read_timeout)),
	] {
		if let Err(e) = result {
			warn!("could not set {} timeout: {}", label, e);
		}
	}

	if target.scheme.is_encrypted() {
		// `sock` is dropped, and thereby closed, if the handshake fails.
		handshake(target, sock, config)
	} else {
		Ok(Connection::Plain(sock))
	}
}
