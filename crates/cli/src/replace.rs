// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-place text replacement handler.

use crate::dom::{Document, NodeId};
use crate::inputs::InputFieldProcessor;
use crate::results::{ResultAggregator, RuleResult};
use crate::rule::ActiveRule;
use crate::walker::NodeHandler;

/// Rewrites text node data and form control values for one rule.
pub struct ReplaceHandler<'r> {
    rule: &'r ActiveRule,
}

impl<'r> ReplaceHandler<'r> {
    pub fn new(rule: &'r ActiveRule) -> Self {
        Self { rule }
    }
}

impl NodeHandler for ReplaceHandler<'_> {
    fn handles_form_controls(&self) -> bool {
        true
    }

    fn form_control(&mut self, doc: &mut Document, control: NodeId, results: &mut ResultAggregator) {
        InputFieldProcessor::new(self.rule).apply(doc, control, results);
    }

    fn text(&mut self, doc: &mut Document, text: NodeId, results: &mut ResultAggregator) {
        let Some(pattern) = &self.rule.pattern else {
            return;
        };
        let Some(content) = doc.text(text) else {
            return;
        };
        let mut partial = RuleResult::default();
        let Some(replaced) = pattern.replace_all(content, &self.rule.replace, &mut partial) else {
            return;
        };
        match doc.set_text(text, &replaced) {
            Ok(()) => results.merge(&self.rule.key, partial),
            Err(e) => tracing::warn!("failed to replace text: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "replace_tests.rs"]
mod tests;
