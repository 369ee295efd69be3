// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: exchange.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Writes the bare GET request and pulls the raw response off the wire.
//!
//! The request is built by hand so no client library can add headers of
//! its own: servers answer a minimal request differently, and that
//! difference is part of the fingerprint.

use crate::hhh::config::{ProbeConfig, ReadStrategy};
use crate::hhh::error::{HhhError, Result};
use crate::hhh::headers::headers_complete;
use crate::hhh::transport::Connection;
use log::{debug, trace, warn};
use std::io::{self, Read, Write};

/// Path requested regardless of the URL path: fingerprints describe the
/// default route.
pub const REQUEST_PATH: &str = "/";

/// Bytes received from the server, at most `buffer_size` of them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawResponse {
	bytes: Vec<u8>,
}

impl RawResponse {
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}

pub fn build_request(host_header: &str) -> String {
	format!(
		"GET {} HTTP/1.1\r\nHost: {}\r\n\r\n",
		REQUEST_PATH, host_header
	)
}

/// Sends the request over `conn`, reads the response and closes the
/// connection on every path.
pub fn exchange(
	mut conn: Connection,
	host_header: &str,
	config: &ProbeConfig,
) -> Result<RawResponse> {
	debug!(
		"sending request over {} connection",
		if conn.is_encrypted() { "TLS" } else { "plain" }
	);
	let result = exchange_on(&mut conn, host_header, config);
	conn.close();
	result
}

pub fn exchange_on<S: Read + Write>(
	stream: &mut S,
	host_header: &str,
	config: &ProbeConfig,
) -> Result<RawResponse> {
	let request = build_request(host_header);
	trace!("request: {:?}", request);
	stream
		.write_all(request.as_bytes())
		.and_then(|_| stream.flush())
		.map_err(|source| HhhError::Write {
			host: host_header.to_string(),
			source,
		})?;

	let (bytes, failure) = match config.read_strategy {
		ReadStrategy::Single => read_once(stream, config.buffer_size),
		ReadStrategy::UntilHeadersEnd => {
			read_until_headers_end(stream, config.buffer_size)
		}
	};
	// Read failures are not fatal: whatever arrived is still fingerprinted.
	if let Some(source) = failure {
		let err = HhhError::Read {
			host: host_header.to_string(),
			source,
		};
		warn!("{} (kept {} bytes)", err, bytes.len());
	}
	debug!("read {} response bytes", bytes.len());
	Ok(RawResponse::new(bytes))
}

type ReadOutcome = (Vec<u8>, Option<io::Error>);

fn read_once<R: Read>(reader: &mut R, limit: usize) -> ReadOutcome {
	let mut buf = vec![0u8; limit];
	let (n, failure) = loop {
		match reader.read(&mut buf) {
			Ok(n) => break (n, None),
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => break (0, Some(e)),
		}
	};
	buf.truncate(n);
	(buf, failure)
}

fn read_until_headers_end<R: Read>(
	reader: &mut R,
	limit: usize,
) -> ReadOutcome {
	let mut buf = vec![0u8; limit];
	let mut filled = 0;
	let mut failure = None;
	while filled < limit {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => {
				filled += n;
				if headers_complete(&buf[..filled]) {
					break;
				}
			}
			Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
			Err(e) => {
				failure = Some(e);
				break;
			}
		}
	}
	buf.truncate(filled);
	(buf, failure)
}
