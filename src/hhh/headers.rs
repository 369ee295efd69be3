// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: headers.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! Header name extraction from a raw HTTP/1.x response.

/// Ordered header names as they appeared on the wire.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderBlock {
	pub names: Vec<String>,
	/// Whether the blank line ending the header section was seen. A
	/// short read leaves this false and the name list partial.
	pub terminated: bool,
}

impl HeaderBlock {
	pub fn parse(raw: &[u8]) -> Self {
		let text = String::from_utf8_lossy(raw);
		let mut block = Self::default();

		// Line 0 is the status line.
		for line in text.split('\n').skip(1) {
			let line = line.strip_suffix('\r').unwrap_or(line);
			match line.find(':') {
				Some(idx) => block.names.push(line[..idx].to_string()),
				None => {
					block.terminated = line.is_empty();
					break;
				}
			}
		}
		block
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

/// Ordered header names of `raw`, status line and values dropped.
pub fn extract_header_names(raw: &[u8]) -> Vec<String> {
	HeaderBlock::parse(raw).names
}

/// True once `buf` holds the blank line that ends the header section.
pub fn headers_complete(buf: &[u8]) -> bool {
	buf.windows(2).any(|w| w == b"\n\n")
		|| buf.windows(3).any(|w| w == b"\n\r\n")
}
