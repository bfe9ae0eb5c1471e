// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled search patterns.

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::config::ScopeFlags;
use crate::results::RuleResult;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("search string is empty")]
    Empty,

    #[error("invalid pattern {pattern:?}: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// One occurrence of a pattern in a haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<'h> {
    pub range: Range<usize>,
    pub text: &'h str,
}

/// A validated pattern, built per rule per invocation.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Non-empty matches, left to right.
    pub fn find_iter<'h>(&self, haystack: &'h str) -> impl Iterator<Item = MatchRecord<'h>> {
        self.regex
            .find_iter(haystack)
            .filter(|m| !m.is_empty())
            .map(|m| MatchRecord {
                range: m.range(),
                text: m.as_str(),
            })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.find_iter(haystack).next().is_some()
    }

    /// Replace every match with `replacement`, taken literally, recording
    /// each match into `result`. Returns `None` when nothing matched.
    pub fn replace_all(&self, haystack: &str, replacement: &str, result: &mut RuleResult) -> Option<String> {
        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        let mut matched = false;
        for m in self.find_iter(haystack) {
            out.push_str(&haystack[last..m.range.start]);
            out.push_str(replacement);
            result.record(m.text);
            last = m.range.end;
            matched = true;
        }
        if !matched {
            return None;
        }
        out.push_str(&haystack[last..]);
        Some(out)
    }
}

/// Build the pattern for `search` under `scope`, returning the error.
pub fn check(search: &str, scope: &ScopeFlags) -> Result<CompiledPattern, PatternError> {
    if search.is_empty() {
        return Err(PatternError::Empty);
    }
    let source = if scope.use_regex {
        search.to_string()
    } else {
        regex::escape(search)
    };
    let regex = RegexBuilder::new(&source)
        .case_insensitive(!scope.match_case)
        .build()
        .map_err(|e| PatternError::Invalid {
            pattern: search.to_string(),
            source: Box::new(e),
        })?;
    Ok(CompiledPattern { regex })
}

/// Build the pattern for `search` under `scope`; a malformed pattern is
/// logged and yields `None` so the caller skips the rule.
pub fn compile(search: &str, scope: &ScopeFlags) -> Option<CompiledPattern> {
    match check(search, scope) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}
