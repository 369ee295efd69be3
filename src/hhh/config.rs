// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: config.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Probe settings assembled once from the command line.

use clap::ValueEnum;
use std::fmt;
use std::time::Duration;
use strum::EnumIter;

pub const DEFAULT_BUFFER_SIZE: usize = 8192;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How much of the response is pulled off the socket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, EnumIter)]
#[value(rename_all = "kebab-case")]
pub enum ReadStrategy {
	/// One bounded read. Fingerprints stay comparable with existing
	/// HHHash corpora, but large header blocks may be cut short.
	Single,
	/// Keep reading until the blank line, EOF or the buffer bound.
	UntilHeadersEnd,
}

impl fmt::Display for ReadStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Single => "single",
			Self::UntilHeadersEnd => "until-headers-end",
		};
		write!(f, "{}", label)
	}
}

#[derive(Clone, Debug)]
pub struct ProbeConfig {
	/// Validate the peer certificate chain against the bundled Mozilla
	/// roots. Off by default: fingerprinting has to reach self-signed
	/// and expired endpoints too.
	pub verify_peer_certificate: bool,
	pub connect_timeout: Option<Duration>,
	/// Applied to socket writes as well.
	pub read_timeout: Option<Duration>,
	pub read_strategy: ReadStrategy,
	pub buffer_size: usize,
}

impl Default for ProbeConfig {
	fn default() -> Self {
		Self {
			verify_peer_certificate: false,
			connect_timeout: Some(DEFAULT_TIMEOUT),
			read_timeout: Some(DEFAULT_TIMEOUT),
			read_strategy: ReadStrategy::Single,
			buffer_size: DEFAULT_BUFFER_SIZE,
		}
	}
}

impl ProbeConfig {
	/// Applies one timeout to both connect and read; zero disables it.
	pub fn with_timeout(mut self, seconds: u64) -> Self {
		let timeout = if seconds == 0 {
			None
		} else {
			Some(Duration::from_secs(seconds))
		};
		self.connect_timeout = timeout;
		self.read_timeout = timeout;
		self
	}
}
