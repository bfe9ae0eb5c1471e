// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! xword: rule-driven find/replace and find/highlight over document trees.
//!
//! A pass reads the rule list and scope flags from a settings store, walks
//! the document, its same-origin frames and its form controls, and returns
//! one result per active rule. Highlighting either wraps matches in the tree
//! or paints them on canvases stacked over their containers; a supervisor
//! can keep highlights current while the document changes.

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod dom;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod inputs;
pub mod loader;
pub mod pattern;
pub mod relay;
pub mod replace;
pub mod report;
pub mod results;
pub mod rewrite;
pub mod rule;
pub mod store;
pub mod supervisor;
pub mod walker;

#[cfg(test)]
pub mod test_utils;

pub use config::{Rule, ScopeFlags, Settings};
pub use dom::Document;
pub use engine::Engine;
pub use error::{Error, Result};
pub use relay::{Command, LivePage};
pub use results::{ResultMap, RuleResult};
pub use supervisor::MutationSupervisor;
