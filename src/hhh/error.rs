// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: error.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Error taxonomy shared by every probe stage.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HhhError>;

#[derive(Debug, Error)]
pub enum HhhError {
	#[error("URL {url} is not valid: {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error(
		"URL {url} has an invalid scheme '{scheme}'. Only http or https are allowed."
	)]
	UnsupportedScheme { url: String, scheme: String },

	#[error("failed to resolve {host}:{port}: {source}")]
	Resolve {
		host: String,
		port: u16,
		#[source]
		source: io::Error,
	},

	#[error("failed to connect to {host}:{port}: {source}")]
	Connect {
		host: String,
		port: u16,
		#[source]
		source: io::Error,
	},

	#[error("invalid TLS server name {host}")]
	TlsServerName { host: String },

	#[error("TLS handshake with {host} failed: {source}")]
	TlsHandshake {
		host: String,
		#[source]
		source: io::Error,
	},

	#[error("failed to send request to {host}: {source}")]
	Write {
		host: String,
		#[source]
		source: io::Error,
	},

	#[error("failed to read response from {host}: {source}")]
	Read {
		host: String,
		#[source]
		source: io::Error,
	},

	#[error("failed to render output: {0}")]
	Output(#[from] serde_json::Error),

	#[error("invalid fingerprint '{input}': {reason}")]
	InvalidFingerprint { input: String, reason: &'static str },
}

impl HhhError {
	/// True for URL failures, raised before any socket is opened.
	pub fn is_url_error(&self) -> bool {
		matches!(
			self,
			Self::InvalidUrl { .. } | Self::UnsupportedScheme { .. }
		)
	}
}
