// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: app.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use crate::hhh::config::{ProbeConfig, ReadStrategy};
use crate::hhh::error::HhhError;
use crate::hhh::fingerprint::Fingerprint;
use crate::hhh::output::{
	emit_truncation_warning, render, render_header_list, OutputFormat,
};
use crate::hhh::probe::probe_url;
use crate::hhh::target::has_http_prefix;
use clap::error::ErrorKind;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Generator, Shell};
use colored::*;
use log::LevelFilter;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
Written by {author-with-newline}{about-with-newline}
Computes the HHHash of a server: the SHA-256 of the response header
names, in wire order, returned for a bare `GET /`.
  hhhash https://example.com/
{usage-heading} {usage}

{all-args}{after-help}
";

const URL_HINT: &str = "Correct format: http(s)://<domain>/";

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about("Fingerprint HTTP servers by their response header order")
		.arg_required_else_help(true)
		.arg(
			Arg::new("URL")
				.help("http:// or https:// URL to fingerprint")
				.value_parser(parse_url_arg)
				.required_unless_present("generate-completions"),
		)
		.arg(
			Arg::new("verify-certs")
				.long("verify-certs")
				.action(ArgAction::SetTrue)
				.help("Validate the TLS certificate chain (off by default)"),
		)
		.arg(
			Arg::new("timeout")
				.long("timeout")
				.value_name("SECS")
				.value_parser(clap::value_parser!(u64))
				.default_value("10")
				.help("Connect and read timeout in seconds, 0 disables"),
		)
		.arg(
			Arg::new("read-strategy")
				.long("read-strategy")
				.value_parser(clap::value_parser!(ReadStrategy))
				.default_value("single")
				.help("Single bounded read, or read until the end of headers"),
		)
		.arg(
			Arg::new("buffer-size")
				.long("buffer-size")
				.value_name("BYTES")
				.value_parser(parse_buffer_size)
				.default_value("8192")
				.help("Upper bound of response bytes read"),
		)
		.arg(
			Arg::new("format")
				.short('f')
				.long("format")
				.value_parser(clap::value_parser!(OutputFormat))
				.default_value("text")
				.help("Output format"),
		)
		.arg(
			Arg::new("show-headers")
				.long("show-headers")
				.action(ArgAction::SetTrue)
				.help("Print the extracted header names to stderr"),
		)
		.arg(
			Arg::new("expect")
				.long("expect")
				.value_name("FINGERPRINT")
				.value_parser(|s: &str| s.parse::<Fingerprint>())
				.help("Fail unless the computed fingerprint equals this one"),
		)
		.arg(
			Arg::new("generate-completions")
				.long("generate-completions")
				.value_name("SHELL")
				.value_parser(clap::value_parser!(Shell))
				.help("Print shell completions and exit"),
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.action(ArgAction::Count)
				.help("Increase log verbosity (-v, -vv, -vvv)"),
		)
}

fn parse_url_arg(url: &str) -> Result<String, String> {
	if has_http_prefix(url) {
		Ok(url.to_string())
	} else {
		Err(format!("Given URL is not valid. {}", URL_HINT))
	}
}

fn parse_buffer_size(value: &str) -> Result<usize, String> {
	match value.parse::<usize>() {
		Ok(0) => Err("buffer size must be at least 1 byte".to_string()),
		Ok(n) => Ok(n),
		Err(e) => Err(e.to_string()),
	}
}

fn init_logging(verbosity: u8) {
	let level = match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	let _ = env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.format_timestamp(None)
		.target(env_logger::Target::Stderr)
		.try_init();
}

fn config_from(matches: &ArgMatches) -> ProbeConfig {
	let mut config = ProbeConfig::default()
		.with_timeout(*matches.get_one::<u64>("timeout").unwrap_or(&10));
	config.verify_peer_certificate = matches.get_flag("verify-certs");
	if let Some(strategy) = matches.get_one::<ReadStrategy>("read-strategy") {
		config.read_strategy = *strategy;
	}
	if let Some(size) = matches.get_one::<usize>("buffer-size") {
		config.buffer_size = *size;
	}
	config
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(
		gen,
		cmd,
		cmd.get_name().to_string(),
		&mut std::io::stdout(),
	);
}

fn report_error(err: &HhhError) {
	eprintln!("{} {}", "Error:".red().bold(), err);
	if err.is_url_error() {
		eprintln!("{}", URL_HINT);
	}
}

/// Runs one probe as described by `matches` and prints the result.
/// Returns whether the process should exit successfully.
pub fn execute(matches: &ArgMatches) -> Result<bool, HhhError> {
	if let Some(shell) = matches.get_one::<Shell>("generate-completions") {
		print_completions(*shell, &mut build_cli());
		return Ok(true);
	}

	let url = matches
		.get_one::<String>("URL")
		.expect("URL is required unless completions are requested");
	let config = config_from(matches);

	let report = probe_url(url, &config)?;
	let format = matches
		.get_one::<OutputFormat>("format")
		.copied()
		.unwrap_or(OutputFormat::Text);

	if !report.terminated {
		emit_truncation_warning(&report);
	}
	if matches.get_flag("show-headers") && format == OutputFormat::Text {
		eprintln!("{}", render_header_list(&report));
	}
	println!("{}", render(&report, format)?);

	if let Some(expected) = matches.get_one::<Fingerprint>("expect") {
		if *expected != report.fingerprint {
			eprintln!(
				"{} fingerprint mismatch: expected {}, got {}",
				"Error:".red().bold(),
				expected,
				report.fingerprint
			);
			return Ok(false);
		}
	}
	Ok(true)
}

pub fn run() -> ExitCode {
	let matches = match build_cli().try_get_matches() {
		Ok(m) => m,
		Err(e) => {
			let _ = e.print();
			return match e.kind() {
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
					ExitCode::SUCCESS
				}
				_ => ExitCode::FAILURE,
			};
		}
	};
	init_logging(matches.get_count("verbose"));

	match execute(&matches) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(err) => {
			report_error(&err);
			ExitCode::FAILURE
		}
	}
}
