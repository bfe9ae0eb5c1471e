// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling.

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// `--color` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the environment and whether stdout is a terminal.
    pub fn choice(self) -> ColorChoice {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        match self {
            ColorMode::Always => resolve_color(true, no_color),
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if std::io::stdout().is_terminal() => resolve_color(false, no_color),
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// `NO_COLOR` wins over a forced color request.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else if force_color {
        ColorChoice::Always
    } else {
        ColorChoice::Auto
    }
}

/// Colors used by the text report.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Rule key.
    pub fn key() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Nonzero match count.
    pub fn count() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Zero match count.
    pub fn none() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    /// Matched strings.
    pub fn matched() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }

    pub fn error() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
