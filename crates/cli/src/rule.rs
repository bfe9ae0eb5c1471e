// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules prepared for one invocation.

use crate::config::{Rule, Settings};
use crate::pattern::{self, CompiledPattern};

/// Colors applied to a highlighted match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightColors {
    pub background: String,
    pub text: String,
}

/// An active rule with its pattern compiled against the current scope.
///
/// `pattern` is `None` when the search string failed to compile; such a
/// rule still reports an empty result.
#[derive(Debug, Clone)]
pub struct ActiveRule {
    pub key: String,
    pub pattern: Option<CompiledPattern>,
    pub replace: String,
    pub colors: HighlightColors,
}

impl ActiveRule {
    pub fn new(rule: &Rule, settings: &Settings) -> Self {
        let colors = HighlightColors {
            background: rule
                .highlight_background
                .clone()
                .unwrap_or_else(|| settings.highlight.background.clone()),
            text: rule
                .highlight_text
                .clone()
                .unwrap_or_else(|| settings.highlight.text.clone()),
        };
        Self {
            key: rule.search.clone(),
            pattern: pattern::compile(&rule.search, &settings.scope),
            replace: rule.replace.clone(),
            colors,
        }
    }

    /// Snapshot the active rules of `settings`, in list order.
    pub fn prepare(settings: &Settings) -> Vec<ActiveRule> {
        settings
            .active_rules()
            .into_iter()
            .map(|rule| ActiveRule::new(rule, settings))
            .collect()
    }
}
