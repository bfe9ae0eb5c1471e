// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canvas overlay highlighting.
//!
//! One walk handles every rule. Rectangles are collected per container (the
//! parent element of the matching text) and painted when the walker leaves
//! that container, onto a canvas that is a direct child of it. A container
//! whose canvas exists but has no matches this pass is cleared, so stale
//! highlights disappear.

use serde::Serialize;

use crate::dom::{self, CANVAS_CLASS, Document, NodeId};
use crate::geometry::{Geometry, Rect};
use crate::results::ResultAggregator;
use crate::rule::ActiveRule;
use crate::walker::NodeHandler;

/// Canvas inline style: stacked over the container, never intercepting input.
const CANVAS_STYLE: &str = "position: absolute; top: 0; left: 0; pointer-events: none";

/// A rectangle to paint, relative to its container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayRect {
    pub rect: Rect,
    pub color: String,
}

pub struct OverlayHandler<'a> {
    rules: &'a [ActiveRule],
    geometry: &'a dyn Geometry,
    alpha: f64,
    /// One rectangle list per container currently being walked.
    pending: Vec<Vec<OverlayRect>>,
}

impl<'a> OverlayHandler<'a> {
    pub fn new(rules: &'a [ActiveRule], geometry: &'a dyn Geometry, alpha: f64) -> Self {
        Self {
            rules,
            geometry,
            alpha,
            pending: Vec::new(),
        }
    }

    fn paint(&self, doc: &mut Document, container: NodeId, rects: &[OverlayRect]) -> dom::Result<()> {
        let existing = find_canvas(doc, container);
        if rects.is_empty() {
            if let Some(canvas) = existing {
                doc.canvas_mut(canvas)?.clear();
            }
            return Ok(());
        }

        let canvas = match existing {
            Some(canvas) => canvas,
            None => create_canvas(doc, container)?,
        };
        let size = self
            .geometry
            .element_rect(doc, container)
            .unwrap_or_default();
        let surface = doc.canvas_mut(canvas)?;
        surface.resize(size.width, size.height);
        surface.clear();
        for r in rects {
            surface.fill_rect(r.rect, &r.color, self.alpha);
        }
        Ok(())
    }
}

impl NodeHandler for OverlayHandler<'_> {
    fn enter_container(&mut self, _doc: &Document, _container: NodeId) {
        self.pending.push(Vec::new());
    }

    fn leave_container(&mut self, doc: &mut Document, container: NodeId) {
        let rects = self.pending.pop().unwrap_or_default();
        if let Err(e) = self.paint(doc, container, &rects) {
            tracing::warn!("failed to paint highlight overlay: {}", e);
        }
    }

    fn text(&mut self, doc: &mut Document, node: NodeId, results: &mut ResultAggregator) {
        let Some(text) = doc.text(node) else {
            return;
        };
        let origin = doc
            .parent(node)
            .and_then(|container| self.geometry.element_rect(doc, container));

        for rule in self.rules {
            let Some(pattern) = &rule.pattern else {
                continue;
            };
            for m in pattern.find_iter(text) {
                results.record(&rule.key, m.text);
                let Some(origin) = origin else {
                    continue;
                };
                let Some(rect) = self.geometry.range_rect(doc, node, m.range.clone()) else {
                    continue;
                };
                if let Some(list) = self.pending.last_mut() {
                    list.push(OverlayRect {
                        rect: rect.relative_to(&origin),
                        color: rule.colors.background.clone(),
                    });
                }
            }
        }
    }
}

/// The overlay canvas among the direct children of `container`.
pub fn find_canvas(doc: &Document, container: NodeId) -> Option<NodeId> {
    doc.children(container)
        .iter()
        .copied()
        .find(|child| doc.tag_name(*child) == Some("canvas") && doc.has_class(*child, CANVAS_CLASS))
}

fn create_canvas(doc: &mut Document, container: NodeId) -> dom::Result<NodeId> {
    adjust_stacking(doc, container)?;
    let canvas = doc.create_element("canvas");
    doc.set_attr(canvas, "class", CANVAS_CLASS)?;
    doc.set_attr(canvas, "style", CANVAS_STYLE)?;
    doc.append_child(container, canvas)?;
    Ok(canvas)
}

/// Give the container a positioning context and a stacking order so the
/// canvas sits over its text.
pub fn adjust_stacking(doc: &mut Document, container: NodeId) -> dom::Result<()> {
    let position = doc.style(container, "position");
    if position.as_deref().is_none_or(|p| p == "static") {
        doc.set_style(container, "position", "relative")?;
    }
    let z_index = doc.style(container, "z-index");
    if z_index.as_deref().is_none_or(|z| z == "auto") {
        doc.set_style(container, "z-index", "1")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
