// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format output.
//!
//! The result map serializes in rule order as
//! `{"<search>": {"matches": [...], "total": n}}`.

use std::io::{self, Write};

use termcolor::WriteColor;

use super::ResultFormatter;
use crate::results::ResultMap;

pub struct JsonFormatter;

impl ResultFormatter for JsonFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &ResultMap) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)
    }
}
