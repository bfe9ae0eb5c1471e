// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Node-level wrapping of matches.

use crate::dom::{self, COUNT_BADGE_CLASS, Document, HIGHLIGHT_CLASS, HIGHLIGHT_TAG, NodeId};
use crate::pattern::MatchRecord;
use crate::results::ResultAggregator;
use crate::rewrite::wrapper_style;
use crate::rule::{ActiveRule, HighlightColors};
use crate::walker::NodeHandler;

/// Splits text nodes around matches of one rule and wraps each match.
pub struct StructuralHandler<'r> {
    rule: &'r ActiveRule,
}

impl<'r> StructuralHandler<'r> {
    pub fn new(rule: &'r ActiveRule) -> Self {
        Self { rule }
    }

    fn split(
        &self,
        doc: &mut Document,
        node: NodeId,
        text: &str,
        matches: &[MatchRecord<'_>],
        results: &mut ResultAggregator,
    ) -> dom::Result<()> {
        let parent = doc.parent(node).ok_or(dom::DomError::Detached(node))?;
        let mut last = 0;
        for m in matches {
            if m.range.start > last {
                let before = doc.create_text(&text[last..m.range.start]);
                doc.insert_before(parent, before, node)?;
            }
            results.record(&self.rule.key, m.text);
            let index = results.total(&self.rule.key);
            let wrapper = build_wrapper(doc, m.text, &self.rule.colors, index)?;
            doc.insert_before(parent, wrapper, node)?;
            last = m.range.end;
        }
        if last < text.len() {
            let after = doc.create_text(&text[last..]);
            doc.insert_before(parent, after, node)?;
        }
        doc.discard(node)
    }

    /// Count the matches in a highlight wrapper's text once, at its first
    /// text node. Nothing inside a wrapper is wrapped again.
    fn count_wrapped(
        &self,
        doc: &Document,
        node: NodeId,
        wrapper: NodeId,
        results: &mut ResultAggregator,
    ) {
        let Some(pattern) = &self.rule.pattern else {
            return;
        };
        let texts = wrapper_texts(doc, wrapper);
        if texts.first() != Some(&node) {
            return;
        }
        let text: String = texts.iter().filter_map(|t| doc.text(*t)).collect();
        for m in pattern.find_iter(&text) {
            results.record(&self.rule.key, m.text);
        }
    }
}

/// The outermost highlight wrapper enclosing `node`.
fn outermost_wrapper(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut found = None;
    let mut cursor = doc.parent(node);
    while let Some(id) = cursor {
        if doc.has_class(id, HIGHLIGHT_CLASS) {
            found = Some(id);
        }
        cursor = doc.parent(id);
    }
    found
}

/// Text nodes of a wrapper in document order, count badges excluded.
fn wrapper_texts(doc: &Document, wrapper: NodeId) -> Vec<NodeId> {
    doc.descendants(wrapper)
        .into_iter()
        .filter(|t| doc.text(*t).is_some())
        .filter(|t| {
            let mut cursor = doc.parent(*t);
            while let Some(id) = cursor.filter(|id| *id != wrapper) {
                if doc.has_class(id, COUNT_BADGE_CLASS) {
                    return false;
                }
                cursor = doc.parent(id);
            }
            true
        })
        .collect()
}

impl NodeHandler for StructuralHandler<'_> {
    fn text(&mut self, doc: &mut Document, node: NodeId, results: &mut ResultAggregator) {
        let Some(pattern) = &self.rule.pattern else {
            return;
        };
        if let Some(wrapper) = outermost_wrapper(doc, node) {
            self.count_wrapped(doc, node, wrapper, results);
            return;
        }
        let Some(text) = doc.text(node).map(str::to_string) else {
            return;
        };

        let matches: Vec<MatchRecord<'_>> = pattern.find_iter(&text).collect();
        if matches.is_empty() {
            return;
        }
        if let Err(e) = self.split(doc, node, &text, &matches, results) {
            tracing::warn!("failed to replace text with element: {}", e);
        }
    }
}

/// Build a detached highlight wrapper: the matched text followed by a
/// count badge holding `index`.
pub fn build_wrapper(
    doc: &mut Document,
    matched: &str,
    colors: &HighlightColors,
    index: usize,
) -> dom::Result<NodeId> {
    let wrapper = doc.create_element(HIGHLIGHT_TAG);
    doc.set_attr(wrapper, "class", HIGHLIGHT_CLASS)?;
    doc.set_attr(wrapper, "style", &wrapper_style(colors))?;
    let text = doc.create_text(matched);
    doc.append_child(wrapper, text)?;

    let badge = doc.create_element("span");
    doc.set_attr(badge, "class", COUNT_BADGE_CLASS)?;
    let count = doc.create_text(&index.to_string());
    doc.append_child(badge, count)?;
    doc.append_child(wrapper, badge)?;
    Ok(wrapper)
}

#[cfg(test)]
#[path = "structural_tests.rs"]
mod tests;
