// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: probe.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

mod common;

use common::*;
use hex_literal::hex;
use hhhash::hhh::config::{ProbeConfig, ReadStrategy};
use hhhash::hhh::target::Scheme;
use hhhash::{generate_hhhash, probe_url, HhhError};

#[test]
fn fingerprint_of_minimal_response() {
	let (port, server) = serve_bytes(CONTENT_TYPE_LENGTH);
	let url = format!("http://127.0.0.1:{}/", port);

	let report = probe_url(&url, &ProbeConfig::default()).unwrap();
	assert_eq!(report.fingerprint.to_string(), CONTENT_TYPE_LENGTH_HHHASH);
	assert_eq!(
		report.fingerprint.digest()[..],
		hex!("6fd4c10bacc99597cb71c2ec7274efacfbfb0d1dbfac2fcbc38c1c24b75b3f3b")
	);
	assert_eq!(report.headers, vec!["Content-Type", "Content-Length"]);
	assert!(report.terminated);
	assert_eq!(report.scheme, Scheme::Http);
	assert_eq!(report.bytes_read, CONTENT_TYPE_LENGTH.len());
	server.join().unwrap();
}

#[test]
fn request_is_bare_get_of_root() {
	let (port, server) = serve_bytes(CONTENT_TYPE_LENGTH);
	let url = format!("http://127.0.0.1:{}/ignored/path?q=1", port);

	generate_hhhash(&url).unwrap();
	let request = server.join().unwrap();
	assert_eq!(
		String::from_utf8(request).unwrap(),
		format!("GET / HTTP/1.1\r\nHost: 127.0.0.1:{}\r\n\r\n", port)
	);
}

#[test]
fn truncated_header_block_still_fingerprints() {
	let (port, server) =
		serve_bytes(b"HTTP/1.1 200 OK\r\nDate: x\r\nServer: y\r\nX-Cut");
	let url = format!("http://127.0.0.1:{}/", port);

	let report = probe_url(&url, &ProbeConfig::default()).unwrap();
	assert_eq!(report.headers, vec!["Date", "Server"]);
	assert!(!report.terminated);
	assert_eq!(
		report.fingerprint.to_string(),
		"hhh:1:838cd9d95eb914a9856cee546d738d1e5bab9769771e98a94aabcf6cdc265edc"
	);
	server.join().unwrap();
}

#[test]
fn silent_server_yields_empty_fingerprint() {
	let (port, server) = serve_once(Vec::new());
	let url = format!("http://127.0.0.1:{}/", port);

	let report = probe_url(&url, &ProbeConfig::default()).unwrap();
	assert_eq!(report.bytes_read, 0);
	assert!(report.headers.is_empty());
	assert_eq!(report.fingerprint.to_string(), EMPTY_HHHASH);
	server.join().unwrap();
}

#[test]
fn looped_read_spans_segments() {
	let (port, server) = serve_once(vec![
		b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n".to_vec(),
		b"Content-Length: 0\r\n\r\n".to_vec(),
	]);
	let url = format!("http://127.0.0.1:{}/", port);
	let config = ProbeConfig {
		read_strategy: ReadStrategy::UntilHeadersEnd,
		..ProbeConfig::default()
	};

	let report = probe_url(&url, &config).unwrap();
	assert_eq!(report.fingerprint.to_string(), CONTENT_TYPE_LENGTH_HHHASH);
	assert!(report.terminated);
	server.join().unwrap();
}

#[test]
fn refused_connection_is_reported() {
	let url = format!("http://127.0.0.1:{}/", closed_port());
	let err = probe_url(&url, &ProbeConfig::default()).unwrap_err();
	assert!(matches!(err, HhhError::Connect { .. }));
}

#[test]
fn unresolvable_host_is_reported() {
	let err = probe_url(
		"http://does-not-exist.invalid/",
		&ProbeConfig::default(),
	)
	.unwrap_err();
	assert!(matches!(err, HhhError::Resolve { .. }));
}

#[test]
fn self_signed_certificate_is_accepted_by_default() {
	let (port, server) = serve_tls_once(CONTENT_TYPE_LENGTH);
	let url = format!("https://localhost:{}/", port);

	let report = probe_url(&url, &ProbeConfig::default()).unwrap();
	assert_eq!(report.scheme, Scheme::Https);
	assert_eq!(report.fingerprint.to_string(), CONTENT_TYPE_LENGTH_HHHASH);
	assert!(report.terminated);
	let request = server.join().unwrap();
	assert_eq!(
		String::from_utf8(request).unwrap(),
		format!("GET / HTTP/1.1\r\nHost: localhost:{}\r\n\r\n", port)
	);
}

#[test]
fn self_signed_certificate_fails_when_verifying() {
	let (port, server) = serve_tls_once(CONTENT_TYPE_LENGTH);
	let url = format!("https://localhost:{}/", port);
	let config = ProbeConfig {
		verify_peer_certificate: true,
		..ProbeConfig::default()
	};

	let err = probe_url(&url, &config).unwrap_err();
	assert!(matches!(err, HhhError::TlsHandshake { .. }));
	assert!(server.join().unwrap().is_empty());
}
