// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: target.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::hhh::error::{HhhError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::{Host, Url};

/// Transport flavour derived from the URL scheme.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
	Http,
	Https,
}

impl Scheme {
	pub fn default_port(self) -> u16 {
		match self {
			Self::Http => 80,
			Self::Https => 443,
		}
	}

	pub fn is_encrypted(self) -> bool {
		matches!(self, Self::Https)
	}
}

impl fmt::Display for Scheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http => write!(f, "http"),
			Self::Https => write!(f, "https"),
		}
	}
}

/// Where a fingerprint probe goes. Built once from a URL and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
	pub scheme: Scheme,
	pub host: String,
	pub port: u16,
	pub path: String,
	explicit_port: bool,
}

impl Target {
	/// Target for `/` on `host`. A port equal to the scheme default is
	/// left out of the `Host` header.
	pub fn new(scheme: Scheme, host: impl Into<String>, port: u16) -> Self {
		Self {
			scheme,
			host: host.into(),
			port,
			path: "/".to_string(),
			explicit_port: port != scheme.default_port(),
		}
	}

	/// Value sent in the `Host` request header. The port is only
	/// appended when the URL carried a non-default one.
	pub fn host_header(&self) -> String {
		if self.explicit_port {
			format!("{}:{}", self.authority_host(), self.port)
		} else {
			self.authority_host()
		}
	}

	/// Host as it appears in a URL authority (IPv6 literals bracketed).
	fn authority_host(&self) -> String {
		if self.host.contains(':') {
			format!("[{}]", self.host)
		} else {
			self.host.clone()
		}
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}://{}:{}{}",
			self.scheme,
			self.authority_host(),
			self.port,
			self.path
		)
	}
}

impl FromStr for Target {
	type Err = HhhError;

	fn from_str(s: &str) -> Result<Self> {
		parse_target(s)
	}
}

/// Cheap prefix check applied before any parsing happens.
pub fn has_http_prefix(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}

pub fn parse_target(url: &str) -> Result<Target> {
	let parsed = Url::parse(url).map_err(|e| HhhError::InvalidUrl {
		url: url.to_string(),
		reason: e.to_string(),
	})?;

	let scheme = match parsed.scheme() {
		"http" => Scheme::Http,
		"https" => Scheme::Https,
		other => {
			return Err(HhhError::UnsupportedScheme {
				url: url.to_string(),
				scheme: other.to_string(),
			})
		}
	};

	let host = match parsed.host() {
		Some(Host::Domain(domain)) => domain.to_string(),
		Some(Host::Ipv4(addr)) => addr.to_string(),
		Some(Host::Ipv6(addr)) => addr.to_string(),
		None => {
			return Err(HhhError::InvalidUrl {
				url: url.to_string(),
				reason: "missing host".to_string(),
			})
		}
	};

	// `Url::port` is None both when absent and when equal to the
	// scheme default, which is exactly when Host omits it.
	let port = parsed.port().unwrap_or_else(|| scheme.default_port());

	Ok(Target {
		path: parsed.path().to_string(),
		..Target::new(scheme, host, port)
	})
}
