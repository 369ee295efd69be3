// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: lib.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

pub mod hhh {
	pub mod app;
	pub mod config;
	pub mod error;
	pub mod exchange;
	pub mod fingerprint;
	pub mod headers;
	pub mod output;
	pub mod probe;
	pub mod target;
	pub mod transport;
}

pub use hhh::error::{HhhError, Result};
pub use hhh::fingerprint::{generate_fingerprint, Fingerprint};
pub use hhh::headers::extract_header_names;
pub use hhh::probe::{generate_hhhash, probe_url, ProbeReport};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn raw_response_to_fingerprint() {
		let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n";
		let names = extract_header_names(raw);
		assert_eq!(names, vec!["Content-Type", "Content-Length"]);
		assert_eq!(
			generate_fingerprint(&names).to_string(),
			"hhh:1:6fd4c10bacc99597cb71c2ec7274efacfbfb0d1dbfac2fcbc38c1c24b75b3f3b"
		);
	}
}
