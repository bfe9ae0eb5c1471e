// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings: the rule list, scope flags, and tuning knobs.
//!
//! Settings are read from `xword.toml`. Field names follow the TOML
//! convention; the camel-case names used by the browser settings store
//! (`searchReplace`, `matchCase`, `backgroundColor`, ...) are accepted as
//! aliases so exported settings load unchanged.

pub mod defaults;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Everything one invocation reads from the settings store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(alias = "searchReplace")]
    pub rules: Vec<Rule>,

    #[serde(alias = "searchConfig")]
    pub scope: ScopeFlags,

    pub highlight: HighlightConfig,

    pub continuous: ContinuousConfig,
}

impl Settings {
    /// Active rules in list order, first occurrence of each key only.
    pub fn active_rules(&self) -> Vec<&Rule> {
        let mut seen = HashSet::new();
        let mut active = Vec::new();
        for rule in self.rules.iter().filter(|r| r.is_active()) {
            if seen.insert(rule.search.as_str()) {
                active.push(rule);
            } else {
                tracing::warn!("skipping duplicate active rule {:?}", rule.search);
            }
        }
        active
    }
}

/// One search/replace/color entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(default = "Rule::default_active")]
    pub active: bool,

    pub search: String,

    #[serde(default)]
    pub replace: String,

    #[serde(
        default,
        alias = "backgroundColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub highlight_background: Option<String>,

    #[serde(default, alias = "textColor", skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
}

impl Rule {
    pub fn new(search: &str, replace: &str) -> Self {
        Self {
            active: true,
            search: search.to_string(),
            replace: replace.to_string(),
            highlight_background: None,
            highlight_text: None,
        }
    }

    pub fn with_colors(mut self, background: &str, text: &str) -> Self {
        self.highlight_background = Some(background.to_string());
        self.highlight_text = Some(text.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// A rule with an empty search string is never active.
    pub fn is_active(&self) -> bool {
        self.active && !self.search.is_empty()
    }

    fn default_active() -> bool {
        true
    }
}

/// Global toggles applied to every rule of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeFlags {
    #[serde(alias = "matchCase")]
    pub match_case: bool,

    /// Treat search strings as regular expressions instead of literals.
    #[serde(alias = "regex")]
    pub use_regex: bool,

    #[serde(alias = "textInputFields")]
    pub scan_input_fields: bool,

    #[serde(alias = "webpage")]
    pub scan_webpage_text: bool,

    /// Rewrite serialized markup at the top level instead of walking text
    /// nodes; selects structural highlighting.
    #[serde(alias = "html")]
    pub scan_markup: bool,

    #[serde(alias = "autoHighlight")]
    pub auto_highlight: bool,
}

impl Default for ScopeFlags {
    fn default() -> Self {
        Self {
            match_case: false,
            use_regex: false,
            scan_input_fields: true,
            scan_webpage_text: true,
            scan_markup: false,
            auto_highlight: false,
        }
    }
}

/// Highlight colors used when a rule leaves them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    #[serde(default = "HighlightConfig::default_background")]
    pub background: String,

    #[serde(default = "HighlightConfig::default_text")]
    pub text: String,

    #[serde(default = "HighlightConfig::default_overlay_alpha")]
    pub overlay_alpha: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            background: Self::default_background(),
            text: Self::default_text(),
            overlay_alpha: Self::default_overlay_alpha(),
        }
    }
}

impl HighlightConfig {
    pub(super) fn default_background() -> String {
        defaults::highlight::BACKGROUND.to_string()
    }

    pub(super) fn default_text() -> String {
        defaults::highlight::TEXT.to_string()
    }

    pub(super) fn default_overlay_alpha() -> f64 {
        defaults::highlight::OVERLAY_ALPHA
    }
}

/// Throttle tuning for continuous highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContinuousConfig {
    #[serde(default = "ContinuousConfig::default_short_interval_ms")]
    pub short_interval_ms: u64,

    #[serde(default = "ContinuousConfig::default_escalated_interval_ms")]
    pub escalated_interval_ms: u64,

    #[serde(default = "ContinuousConfig::default_window_ms")]
    pub window_ms: u64,

    #[serde(default = "ContinuousConfig::default_threshold")]
    pub threshold: usize,

    #[serde(default = "ContinuousConfig::default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            short_interval_ms: Self::default_short_interval_ms(),
            escalated_interval_ms: Self::default_escalated_interval_ms(),
            window_ms: Self::default_window_ms(),
            threshold: Self::default_threshold(),
            backoff_ms: Self::default_backoff_ms(),
        }
    }
}

impl ContinuousConfig {
    pub fn short_interval(&self) -> Duration {
        Duration::from_millis(self.short_interval_ms)
    }

    pub fn escalated_interval(&self) -> Duration {
        Duration::from_millis(self.escalated_interval_ms)
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub(super) fn default_short_interval_ms() -> u64 {
        defaults::continuous::SHORT_INTERVAL_MS
    }

    pub(super) fn default_escalated_interval_ms() -> u64 {
        defaults::continuous::ESCALATED_INTERVAL_MS
    }

    pub(super) fn default_window_ms() -> u64 {
        defaults::continuous::WINDOW_MS
    }

    pub(super) fn default_threshold() -> usize {
        defaults::continuous::THRESHOLD
    }

    pub(super) fn default_backoff_ms() -> u64 {
        defaults::continuous::BACKOFF_MS
    }
}

/// Parse settings from TOML text. `path` is only used in error messages.
pub fn parse(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// Read and parse a settings file.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, path)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
