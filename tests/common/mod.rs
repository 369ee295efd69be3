// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: mod.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Loopback HTTP and HTTPS responders shared by the integration tests.

#![allow(dead_code)]

use rustls::{
	Certificate, PrivateKey, ServerConfig, ServerConnection, StreamOwned,
};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const CONTENT_TYPE_LENGTH: &[u8] =
	b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n";

pub const CONTENT_TYPE_LENGTH_HHHASH: &str =
	"hhh:1:6fd4c10bacc99597cb71c2ec7274efacfbfb0d1dbfac2fcbc38c1c24b75b3f3b";

pub const EMPTY_HHHASH: &str =
	"hhh:1:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn read_request_head<R: Read>(reader: &mut R) -> Vec<u8> {
	let mut request = Vec::new();
	let mut buf = [0u8; 1024];
	while !request.windows(4).any(|w| w == b"\r\n\r\n") {
		match reader.read(&mut buf) {
			Ok(0) | Err(_) => break,
			Ok(n) => request.extend_from_slice(&buf[..n]),
		}
	}
	request
}

/// Accepts one connection on 127.0.0.1, waits for the request head,
/// answers with `segments` (pausing between them) and closes. The
/// handle yields the request bytes that were received.
pub fn serve_once(segments: Vec<Vec<u8>>) -> (u16, JoinHandle<Vec<u8>>) {
	let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
	let port = listener.local_addr().expect("local addr").port();
	let handle = thread::spawn(move || {
		let (mut sock, _) = listener.accept().expect("accept");
		let request = read_request_head(&mut sock);
		for (idx, segment) in segments.iter().enumerate() {
			if idx > 0 {
				thread::sleep(Duration::from_millis(150));
			}
			sock.write_all(segment).expect("write response");
			sock.flush().expect("flush response");
		}
		let _ = sock.shutdown(Shutdown::Write);
		request
	});
	(port, handle)
}

pub fn serve_bytes(response: &[u8]) -> (u16, JoinHandle<Vec<u8>>) {
	serve_once(vec![response.to_vec()])
}

/// Server config with a fresh self-signed certificate for `localhost`.
fn self_signed_server_config() -> Arc<ServerConfig> {
	let cert =
		rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
			.expect("generate certificate");
	let der = cert.serialize_der().expect("encode certificate");
	let chain = vec![Certificate(der)];
	let key = PrivateKey(cert.serialize_private_key_der());
	let config = ServerConfig::builder()
		.with_safe_defaults()
		.with_no_client_auth()
		.with_single_cert(chain, key)
		.expect("server certificate");
	Arc::new(config)
}

/// TLS flavour of [`serve_bytes`] behind a self-signed certificate.
/// Handshake failures are tolerated; the handle then yields whatever
/// request bytes arrived, usually none.
pub fn serve_tls_once(response: &[u8]) -> (u16, JoinHandle<Vec<u8>>) {
	let config = self_signed_server_config();
	let response = response.to_vec();
	let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
	let port = listener.local_addr().expect("local addr").port();
	let handle = thread::spawn(move || {
		let (sock, _) = listener.accept().expect("accept");
		let conn = ServerConnection::new(config).expect("server connection");
		let mut tls = StreamOwned::new(conn, sock);
		let request = read_request_head(&mut tls);
		if !request.is_empty() {
			let _ = tls.write_all(&response);
			tls.conn.send_close_notify();
			let _ = tls.flush();
		}
		let _ = tls.sock.shutdown(Shutdown::Write);
		request
	});
	(port, handle)
}

/// A loopback port nothing listens on.
pub fn closed_port() -> u16 {
	let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
	listener.local_addr().expect("local addr").port()
}
