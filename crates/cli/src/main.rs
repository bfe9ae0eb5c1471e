// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xword::cli::{Cli, Command};

mod cmd_check;
mod cmd_init;
mod cmd_run;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "XWORD_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Replace(args) => cmd_run::run(&cli, args, xword::Command::Replace),
        Command::Highlight(args) => cmd_run::run(&cli, args, xword::Command::Highlight),
        Command::Check(args) => cmd_check::run(args),
        Command::Init(args) => cmd_init::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("xword: {:#}", e);
            ExitCode::from(2)
        }
    }
}
