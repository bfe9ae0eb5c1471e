// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format output.

use std::io::{self, Write};

use termcolor::WriteColor;

use super::ResultFormatter;
use crate::color::scheme;
use crate::results::ResultMap;

/// One line per rule with its total, then the distinct matches indented.
pub struct TextFormatter;

impl ResultFormatter for TextFormatter {
    fn write(&self, out: &mut dyn WriteColor, results: &ResultMap) -> io::Result<()> {
        let mut grand_total = 0;
        for (key, result) in results {
            grand_total += result.total;

            out.set_color(&scheme::key())?;
            write!(out, "{}", key)?;
            out.reset()?;
            write!(out, ": ")?;

            let spec = if result.total > 0 {
                scheme::count()
            } else {
                scheme::none()
            };
            out.set_color(&spec)?;
            write!(out, "{}", result.total)?;
            out.reset()?;
            writeln!(out, " {}", plural(result.total, "match", "matches"))?;

            if !result.matches.is_empty() {
                write!(out, "  ")?;
                for (i, matched) in result.matches.iter().enumerate() {
                    if i > 0 {
                        write!(out, ", ")?;
                    }
                    out.set_color(&scheme::matched())?;
                    write!(out, "{:?}", matched)?;
                    out.reset()?;
                }
                writeln!(out)?;
            }
        }

        writeln!(
            out,
            "{} {}, {} {}",
            results.len(),
            plural(results.len(), "rule", "rules"),
            grand_total,
            plural(grand_total, "match", "matches")
        )
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
