// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: probe.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::hhh::config::ProbeConfig;
use crate::hhh::error::Result;
use crate::hhh::exchange::exchange;
use crate::hhh::fingerprint::{generate_fingerprint, Fingerprint};
use crate::hhh::headers::HeaderBlock;
use crate::hhh::target::{parse_target, Scheme, Target};
use crate::hhh::transport::connect;
use log::{debug, info};
use serde::Serialize;

/// Everything learned from one probe.
#[derive(Clone, Debug, Serialize)]
pub struct ProbeReport {
	pub url: String,
	pub scheme: Scheme,
	pub host: String,
	pub port: u16,
	pub fingerprint: Fingerprint,
	pub headers: Vec<String>,
	pub terminated: bool,
	pub bytes_read: usize,
}

pub fn probe(target: &Target, config: &ProbeConfig) -> Result<ProbeReport> {
	let conn = connect(target, config)?;
	let raw = exchange(conn, &target.host_header(), config)?;
	let block = HeaderBlock::parse(raw.as_bytes());
	debug!(
		"extracted {} header names (terminated: {})",
		block.len(),
		block.terminated
	);
	let fingerprint = generate_fingerprint(&block.names);

	Ok(ProbeReport {
		url: target.to_string(),
		scheme: target.scheme,
		host: target.host.clone(),
		port: target.port,
		fingerprint,
		headers: block.names,
		terminated: block.terminated,
		bytes_read: raw.len(),
	})
}

/// Parses `url` and probes it. Bad URLs fail before any socket is opened.
pub fn probe_url(url: &str, config: &ProbeConfig) -> Result<ProbeReport> {
	let target = parse_target(url)?;
	if !target.path.is_empty() && target.path != "/" {
		info!("ignoring path {}; requesting /", target.path);
	}
	probe(&target, config)
}

/// HHHash of `url` with default settings.
pub fn generate_hhhash(url: &str) -> Result<String> {
	let report = probe_url(url, &ProbeConfig::default())?;
	Ok(report.fingerprint.to_string())
}
