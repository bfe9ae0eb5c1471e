// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rendered geometry for overlay highlighting.
//!
//! The overlay renderer asks a [`Geometry`] provider where text ranges and
//! containers sit on screen. Hosts with a real layout engine implement the
//! trait; [`FixedPitch`] covers documents laid out by [`FixedPitch::flow`]
//! or with rectangles set by hand.

use std::ops::Range;

use serde::Serialize;

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, origin expressed relative to `origin`'s top-left corner.
    pub fn relative_to(&self, origin: &Rect) -> Rect {
        Rect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Source of rendered rectangles.
pub trait Geometry {
    /// Border box of an element, in document coordinates.
    fn element_rect(&self, doc: &Document, element: NodeId) -> Option<Rect>;

    /// Bounding box of a byte range of a text node, in document coordinates.
    fn range_rect(&self, doc: &Document, text: NodeId, range: Range<usize>) -> Option<Rect>;
}

/// Monospace, unwrapped text: each text node renders on one line starting
/// at its own rectangle's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitch {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for FixedPitch {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
        }
    }
}

impl Geometry for FixedPitch {
    fn element_rect(&self, doc: &Document, element: NodeId) -> Option<Rect> {
        doc.rect(element)
    }

    fn range_rect(&self, doc: &Document, text: NodeId, range: Range<usize>) -> Option<Rect> {
        let origin = doc.rect(text)?;
        let content = doc.text(text)?;
        let before = content.get(..range.start)?.chars().count() as f64;
        let len = content.get(range)?.chars().count() as f64;
        Some(Rect::new(
            origin.x + before * self.char_width,
            origin.y,
            len * self.char_width,
            self.line_height,
        ))
    }
}

impl FixedPitch {
    /// Assign rectangles to every node under the body: text nodes and form
    /// controls each take one line, indented by nesting depth; elements
    /// cover their children. Frame documents are laid out on their own.
    pub fn flow(&self, doc: &mut Document) {
        let body = doc.body();
        let mut line = 0usize;
        self.flow_node(doc, body, 0, &mut line);
    }

    fn flow_node(&self, doc: &mut Document, id: NodeId, depth: usize, line: &mut usize) -> Rect {
        let x = depth as f64 * self.char_width;
        let top = *line as f64 * self.line_height;

        if let Some(text) = doc.text(id) {
            let width = text.chars().count() as f64 * self.char_width;
            let rect = Rect::new(x, top, width, self.line_height);
            *line += 1;
            let _ = doc.set_rect(id, rect);
            return rect;
        }

        let is_control = doc.element(id).is_some_and(|el| el.is_form_control());
        if let Ok(frame) = doc.frame_document_mut(id) {
            self.flow(frame);
        }

        let mut rect = Rect::new(x, top, 0.0, 0.0);
        if is_control {
            let width = doc.value(id).map(|v| v.chars().count()).unwrap_or(0).max(1) as f64;
            rect = Rect::new(x, top, width * self.char_width, self.line_height);
            *line += 1;
        } else {
            for child in doc.children(id).to_vec() {
                let child_rect = self.flow_node(doc, child, depth + 1, line);
                rect = rect.union(&child_rect);
            }
        }
        let _ = doc.set_rect(id, rect);
        rect
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
