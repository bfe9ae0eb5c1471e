// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Depth-first document traversal.
//!
//! The walker owns the traversal skeleton shared by replacement and both
//! highlight strategies: which nodes are visited, in what order, how frames
//! are entered, and which nodes are never touched. What happens at a node
//! is up to the [`NodeHandler`].

use crate::config::ScopeFlags;
use crate::dom::{CANVAS_CLASS, COUNT_BADGE_CLASS, Document, NodeData, NodeId};
use crate::results::ResultAggregator;

/// Elements whose text is not rendered prose.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Per-node behaviour plugged into the walker.
pub trait NodeHandler {
    /// Whether form controls should be handed to [`NodeHandler::form_control`].
    fn handles_form_controls(&self) -> bool {
        false
    }

    fn form_control(&mut self, _doc: &mut Document, _control: NodeId, _results: &mut ResultAggregator) {}

    fn text(&mut self, doc: &mut Document, text: NodeId, results: &mut ResultAggregator);

    /// Called before the children of a container are visited.
    fn enter_container(&mut self, _doc: &Document, _container: NodeId) {}

    /// Called after the whole subtree of a container has been visited.
    fn leave_container(&mut self, _doc: &mut Document, _container: NodeId) {}
}

/// What the walker does with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Text,
    FormControl,
    Frame,
    Container,
    Skipped,
}

pub fn classify(doc: &Document, node: NodeId) -> NodeClass {
    match doc.data(node) {
        Some(NodeData::Text(_)) => NodeClass::Text,
        Some(NodeData::Element(el)) => {
            if el.tag() == "canvas"
                || el.has_class(CANVAS_CLASS)
                || el.has_class(COUNT_BADGE_CLASS)
                || RAW_TEXT_TAGS.contains(&el.tag())
            {
                NodeClass::Skipped
            } else if el.is_form_control() {
                NodeClass::FormControl
            } else if el.is_frame() {
                NodeClass::Frame
            } else {
                NodeClass::Container
            }
        }
        _ => NodeClass::Skipped,
    }
}

/// Scope flags that steer traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub scan_input_fields: bool,
    pub scan_webpage_text: bool,
}

impl From<&ScopeFlags> for WalkOptions {
    fn from(scope: &ScopeFlags) -> Self {
        Self {
            scan_input_fields: scope.scan_input_fields,
            scan_webpage_text: scope.scan_webpage_text,
        }
    }
}

pub struct DocumentWalker {
    options: WalkOptions,
}

impl DocumentWalker {
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// Visit the subtree under `root`, left to right.
    ///
    /// Each child list is snapshotted before it is visited, so nodes a
    /// handler inserts are not visited again in the same pass.
    pub fn walk(
        &self,
        doc: &mut Document,
        root: NodeId,
        handler: &mut dyn NodeHandler,
        results: &mut ResultAggregator,
    ) {
        handler.enter_container(doc, root);
        for child in doc.children(root).to_vec() {
            if doc.parent(child) != Some(root) {
                continue; // removed by an earlier sibling's handler
            }
            self.visit(doc, child, handler, results);
        }
        handler.leave_container(doc, root);
    }

    fn visit(
        &self,
        doc: &mut Document,
        node: NodeId,
        handler: &mut dyn NodeHandler,
        results: &mut ResultAggregator,
    ) {
        match classify(doc, node) {
            NodeClass::Text => {
                if self.options.scan_webpage_text {
                    handler.text(doc, node, results);
                }
            }
            NodeClass::FormControl => {
                if self.options.scan_input_fields && handler.handles_form_controls() {
                    handler.form_control(doc, node, results);
                }
            }
            NodeClass::Frame => self.walk_frame(doc, node, handler, results),
            NodeClass::Container => self.walk(doc, node, handler, results),
            NodeClass::Skipped => {}
        }
    }

    /// Walk a frame's document body. Inaccessible frames are skipped; they
    /// are retried on the next pass.
    pub fn walk_frame(
        &self,
        doc: &mut Document,
        frame: NodeId,
        handler: &mut dyn NodeHandler,
        results: &mut ResultAggregator,
    ) {
        match doc.frame_document_mut(frame) {
            Ok(inner) => {
                let body = inner.body();
                self.walk(inner, body, handler, results);
            }
            Err(e) => tracing::debug!("skipping frame: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
