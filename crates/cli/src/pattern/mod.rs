// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern compilation: the single validation gate for search strings.
//!
//! - Literal search: every regex metacharacter is escaped
//! - Regex search: compiled as written
//! - Case sensitivity follows `match_case`; all occurrences are matched
//!
//! Anything that fails to compile is reported here and nowhere else.

pub mod compiler;

pub use compiler::{CompiledPattern, MatchRecord, PatternError, check, compile};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
