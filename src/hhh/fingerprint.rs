// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: fingerprint.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

//! HHHash generation: `hhh:1:` + hex(SHA-256(names joined by ':')).

use crate::hhh::error::HhhError;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub const PREFIX: &str = "hhh";
/// Version tag of the SHA-256 / colon-joined scheme. A different
/// scheme must use a different tag.
pub const VERSION: u32 = 1;
pub const SEPARATOR: &str = ":";

const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint {
	version: u32,
	digest: [u8; DIGEST_LEN],
}

impl Fingerprint {
	pub fn digest(&self) -> &[u8; DIGEST_LEN] {
		&self.digest
	}

	pub fn digest_hex(&self) -> String {
		hex::encode(self.digest)
	}
}

/// Hashes the ordered header names into a version 1 fingerprint.
pub fn generate_fingerprint<S: AsRef<str>>(names: &[S]) -> Fingerprint {
	let mut hasher = Sha256::new();
	for (idx, name) in names.iter().enumerate() {
		if idx > 0 {
			hasher.update(SEPARATOR.as_bytes());
		}
		hasher.update(name.as_ref().as_bytes());
	}
	Fingerprint {
		version: VERSION,
		digest: hasher.finalize().into(),
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", PREFIX, self.version, self.digest_hex())
	}
}

impl Serialize for Fingerprint {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl FromStr for Fingerprint {
	type Err = HhhError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = |reason| HhhError::InvalidFingerprint {
			input: s.to_string(),
			reason,
		};

		let mut parts = s.trim().splitn(3, ':');
		if parts.next() != Some(PREFIX) {
			return Err(invalid("missing 'hhh' prefix"));
		}
		let version: u32 = parts
			.next()
			.and_then(|v| v.parse().ok())
			.ok_or_else(|| invalid("missing version"))?;
		if version != VERSION {
			return Err(invalid("unsupported version"));
		}
		let digest_hex = parts.next().unwrap_or_default();
		if digest_hex.len() != DIGEST_LEN * 2
			|| !digest_hex
				.bytes()
				.all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
		{
			return Err(invalid("digest must be 64 lowercase hex characters"));
		}
		let mut digest = [0u8; DIGEST_LEN];
		hex::decode_to_slice(digest_hex, &mut digest)
			.map_err(|_| invalid("digest is not valid hex"))?;
		Ok(Self { version, digest })
	}
}
