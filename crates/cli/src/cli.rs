// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;

/// Rule-driven find/replace and find/highlight over document files
#[derive(Parser)]
#[command(name = "xword")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "XWORD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replace every match of every active rule
    Replace(RunArgs),
    /// Highlight every match of every active rule
    Highlight(RunArgs),
    /// Check whether a search string compiles
    Check(CheckArgs),
    /// Initialize xword configuration
    Init(InitArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Document file (body markup)
    #[arg(value_name = "DOC")]
    pub document: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Save the resulting body markup to PATH
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}

impl RunArgs {
    pub fn color_mode(&self) -> ColorMode {
        if self.no_color {
            ColorMode::Never
        } else {
            self.color
        }
    }
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Search string to validate
    #[arg(value_name = "SEARCH")]
    pub search: String,

    /// Treat the search string as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Match case exactly
    #[arg(long)]
    pub match_case: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing xword.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
