// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: output.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::hhh::error::Result;
use crate::hhh::probe::ProbeReport;
use clap::ValueEnum;
use colored::Colorize;
use std::fmt;
use strum::EnumIter;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum, EnumIter)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
	/// The fingerprint line only.
	Text,
	/// One JSON object with the fingerprint and the header names.
	Json,
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Text => "text",
			Self::Json => "json",
		};
		write!(f, "{}", label)
	}
}

/// The stdout payload for `report`, without trailing newline.
pub fn render(report: &ProbeReport, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Text => Ok(report.fingerprint.to_string()),
		OutputFormat::Json => Ok(serde_json::to_string(report)?),
	}
}

/// Header names, one per line, for `--show-headers` on stderr.
pub fn render_header_list(report: &ProbeReport) -> String {
	report
		.headers
		.iter()
		.enumerate()
		.map(|(idx, name)| format!("{:>3}  {}", idx + 1, name))
		.collect::<Vec<_>>()
		.join("\n")
}

pub fn emit_truncation_warning(report: &ProbeReport) {
	let warning = format!(
		"Warning: no end of headers within {} bytes from {}; fingerprint covers {} header(s) only.",
		report.bytes_read,
		report.url,
		report.headers.len()
	);
	eprintln!("{}", warning.yellow().bold());
}
