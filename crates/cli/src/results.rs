// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-rule match results.
//!
//! A [`ResultAggregator`] is threaded by `&mut` through one traversal and
//! every sub-traversal (frames, input fields). Partial results always merge
//! by set union and count sum.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Distinct matched strings and total occurrences for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub matches: IndexSet<String>,
    pub total: usize,
}

impl RuleResult {
    pub fn record(&mut self, matched: &str) {
        self.total += 1;
        if !self.matches.contains(matched) {
            self.matches.insert(matched.to_string());
        }
    }

    pub fn merge(&mut self, other: RuleResult) {
        self.total += other.total;
        self.matches.extend(other.matches);
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Rule key (its search string) to result, in active-rule order.
pub type ResultMap = IndexMap<String, RuleResult>;

/// Accumulates results for one top-level operation.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: ResultMap,
}

impl ResultAggregator {
    /// Seed an empty result for every key so rules without matches still
    /// report `{matches: [], total: 0}`.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let results = keys
            .into_iter()
            .map(|k| (k.to_string(), RuleResult::default()))
            .collect();
        Self { results }
    }

    pub fn record(&mut self, key: &str, matched: &str) {
        self.entry(key).record(matched);
    }

    pub fn merge(&mut self, key: &str, partial: RuleResult) {
        self.entry(key).merge(partial);
    }

    pub fn get(&self, key: &str) -> Option<&RuleResult> {
        self.results.get(key)
    }

    /// Running total for `key`; zero for unknown keys.
    pub fn total(&self, key: &str) -> usize {
        self.results.get(key).map_or(0, |r| r.total)
    }

    pub fn into_map(self) -> ResultMap {
        self.results
    }

    fn entry(&mut self, key: &str) -> &mut RuleResult {
        self.results.entry(key.to_string()).or_default()
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
