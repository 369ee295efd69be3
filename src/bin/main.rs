// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hhhash
// File: main.rs
// Author: Volker Schwaberow <volker@schwaberow.de>
// Copyright (c) 2025 Volker Schwaberow

use hhhash::hhh::app;
use std::process::ExitCode;

fn main() -> ExitCode {
	app::run()
}
