// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replacement inside form controls.
//!
//! Works on the runtime value (what the user typed), never the `value`
//! attribute or the control's markup, and never applies highlight colors.
//! A control that cannot be written is logged and skipped; its matches are
//! not counted.

use crate::dom::{Document, NodeId};
use crate::results::{ResultAggregator, RuleResult};
use crate::rule::ActiveRule;

/// Tags treated as form controls.
pub const CONTROL_TAGS: &[&str] = &["input", "textarea"];

pub struct InputFieldProcessor<'r> {
    rule: &'r ActiveRule,
}

impl<'r> InputFieldProcessor<'r> {
    pub fn new(rule: &'r ActiveRule) -> Self {
        Self { rule }
    }

    /// Form controls beneath `root` in document order (frames excluded).
    pub fn controls(doc: &Document, root: NodeId) -> Vec<NodeId> {
        doc.elements_by_tag(root, CONTROL_TAGS)
    }

    /// Process every control in `controls`; one failure never stops the rest.
    pub fn apply_all(&self, doc: &mut Document, controls: &[NodeId], results: &mut ResultAggregator) {
        for control in controls {
            self.apply(doc, *control, results);
        }
    }

    /// Replace matches in one control's value.
    pub fn apply(&self, doc: &mut Document, control: NodeId, results: &mut ResultAggregator) {
        let Some(pattern) = &self.rule.pattern else {
            return;
        };
        if !doc.element(control).is_some_and(|el| el.is_text_control()) {
            return;
        }
        let value = match doc.value(control) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("failed to read form control: {}", e);
                return;
            }
        };

        let mut partial = RuleResult::default();
        let Some(replaced) = pattern.replace_all(&value, &self.rule.replace, &mut partial) else {
            return;
        };
        match doc.set_value(control, &replaced) {
            Ok(()) => results.merge(&self.rule.key, partial),
            Err(e) => tracing::warn!("failed to write form control: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "inputs_tests.rs"]
mod tests;
