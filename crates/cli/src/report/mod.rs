// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result map output.
//!
//! Writes the per-rule results of a pass in text or JSON format.

mod json;
mod text;

use std::io;

use termcolor::WriteColor;

use crate::cli::OutputFormat;
use crate::results::ResultMap;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Trait for writing a result map in one output format.
pub trait ResultFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &ResultMap) -> io::Result<()>;
}

pub fn formatter(format: OutputFormat) -> Box<dyn ResultFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Render without color, for tests and non-terminal sinks.
pub fn format_results(format: OutputFormat, results: &ResultMap) -> io::Result<String> {
    let mut buffer = termcolor::Buffer::no_color();
    formatter(format).write(&mut buffer, results)?;
    String::from_utf8(buffer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
