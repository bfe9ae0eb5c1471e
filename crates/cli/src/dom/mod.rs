// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Arena document model.
//!
//! A [`Document`] owns a flat node arena addressed by [`NodeId`]. Frames own
//! their embedded document, so a traversal only crosses into another
//! document through [`Document::frame_document_mut`], which is also where
//! cross-origin and not-yet-loaded frames are refused.
//!
//! Mutations made while an observer is connected are queued as
//! [`MutationRecord`]s and drained with [`Document::take_records`].

pub mod markup;
mod observer;

pub use observer::{MutationKind, MutationRecord, ObserveOptions};

use std::fmt;

use thiserror::Error;

use crate::geometry::Rect;

/// Class carried by the structural highlight wrapper element.
pub const HIGHLIGHT_CLASS: &str = "xword-search-n-highlight";

/// Class carried by the occurrence badge inside a highlight wrapper.
pub const COUNT_BADGE_CLASS: &str = "x-word-count";

/// Class carried by the overlay canvas.
pub const CANVAS_CLASS: &str = "xword-highlight-canvas";

/// Tag name of the structural highlight wrapper element.
pub const HIGHLIGHT_TAG: &str = "xword";

/// Handle to a node inside one [`Document`].
///
/// Ids are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by document operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0} does not exist")]
    InvalidNode(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("node {0} is not a form control")]
    NotAFormControl(NodeId),

    #[error("form control {0} is read-only")]
    ReadOnly(NodeId),

    #[error("node {0} is detached from the document")]
    Detached(NodeId),

    #[error("cannot insert {child} under {parent}")]
    Hierarchy { parent: NodeId, child: NodeId },

    #[error("node {0} is not a frame")]
    NotAFrame(NodeId),

    #[error("frame {0} is cross-origin")]
    CrossOrigin(NodeId),

    #[error("frame {0} has not finished loading")]
    FrameNotLoaded(NodeId),
}

pub type Result<T> = std::result::Result<T, DomError>;

/// What a frame element embeds.
#[derive(Debug, Clone)]
pub enum FrameContent {
    /// Same-origin document that scripts may read and write.
    Loaded(Box<Document>),
    /// Access refused by the origin policy.
    CrossOrigin,
    /// Navigation has not produced a document yet.
    Pending,
}

/// One filled rectangle on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub color: String,
    pub alpha: f64,
}

/// Bitmap stand-in for a `<canvas>` element: its size and the fills drawn
/// since the last clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSurface {
    width: f64,
    height: f64,
    fills: Vec<Fill>,
}

impl CanvasSurface {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Resizing a canvas discards its contents.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.fills.clear();
    }

    pub fn clear(&mut self) {
        self.fills.clear();
    }

    pub fn fill_rect(&mut self, rect: Rect, color: &str, alpha: f64) {
        self.fills.push(Fill {
            rect,
            color: color.to_string(),
            alpha,
        });
    }
}

/// Element payload.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    /// Runtime value of a form control; `None` until a script writes it.
    value: Option<String>,
    frame: Option<FrameContent>,
    canvas: Option<CanvasSurface>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            value: None,
            frame: None,
            canvas: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.tag.as_str(), "iframe" | "frame")
    }

    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }

    /// Form controls whose value is free text.
    pub fn is_text_control(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => !matches!(
                self.attr("type")
                    .map(|t| t.to_ascii_lowercase())
                    .as_deref(),
                Some(
                    "checkbox"
                        | "radio"
                        | "button"
                        | "submit"
                        | "reset"
                        | "file"
                        | "hidden"
                        | "image"
                        | "color"
                        | "range"
                )
            ),
            _ => false,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.attr("readonly").is_some()
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
    rect: Option<Rect>,
    /// Released slot waiting on the free list.
    vacant: bool,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
            rect: None,
            vacant: false,
        }
    }
}

/// A document tree with a single `<body>` under the document node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
    body: NodeId,
    observer: Option<ObserveOptions>,
    records: Vec<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new(NodeData::Document)],
            free: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            observer: None,
            records: Vec::new(),
        };
        let body = doc.push(NodeData::Element(Element::new("body")));
        doc.nodes[body.0].parent = Some(doc.root);
        doc.nodes[doc.root.0].children.push(body);
        doc.body = body;
        doc
    }

    /// Build a document whose body holds the given markup.
    pub fn from_markup(body_markup: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        markup::parse_into(&mut doc, body, body_markup);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Allocate a node, reusing a released slot when there is one.
    fn push(&mut self, data: NodeData) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Node::new(data);
                id
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Node::new(data));
                id
            }
        }
    }

    /// Return the detached subtree under `id` to the free list. Ids into
    /// it are invalid afterwards and may be handed out again.
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.get_mut(next.0).filter(|n| !n.vacant) else {
                continue;
            };
            stack.append(&mut node.children);
            *node = Node {
                vacant: true,
                ..Node::new(NodeData::Comment(String::new()))
            };
            self.free.push(next);
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .filter(|n| !n.vacant)
            .ok_or(DomError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .filter(|n| !n.vacant)
            .ok_or(DomError::InvalidNode(id))
    }

    /// Allocated slots, live or free.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes currently allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).ok().map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    /// True when `id` is `ancestor` or lies beneath it.
    pub fn is_inclusive_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == ancestor {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_descendant(id, self.root)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(t) = self.text(node) {
                out.push_str(t);
            }
        }
        out
    }

    /// Descendants of `root` in document order, excluding `root` itself.
    /// Does not enter frame documents.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Elements beneath `root` whose tag is one of `tags`, in document order.
    pub fn elements_by_tag(&self, root: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.tag_name(*id).is_some_and(|t| tags.contains(&t)))
            .collect()
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).ok().and_then(|n| n.rect)
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        self.node_mut(id)?.rect = Some(rect);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let can_hold = matches!(
            self.node(parent)?.data,
            NodeData::Element(_) | NodeData::Document
        );
        self.node(child)?;
        if !can_hold || child == self.root || self.is_inclusive_descendant(parent, child) {
            return Err(DomError::Hierarchy { parent, child });
        }
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
            self.record(MutationKind::ChildList, old);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.record(MutationKind::ChildList, parent);
        Ok(())
    }

    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        if self.parent(reference) != Some(parent) {
            return Err(DomError::Hierarchy {
                parent,
                child: reference,
            });
        }
        if child == reference {
            return Ok(());
        }
        self.unlink(child);
        let index = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::Hierarchy {
                parent,
                child: reference,
            })?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
        self.record(MutationKind::ChildList, parent);
        Ok(())
    }

    /// Detach `id` from its parent. The node stays valid and can be
    /// inserted again; see [`Document::discard`] to free it.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(DomError::Hierarchy {
                parent: self.root,
                child: id,
            });
        }
        self.node(id)?;
        self.unlink(id);
        Ok(())
    }

    /// Detach `id` and free its whole subtree.
    pub fn discard(&mut self, id: NodeId) -> Result<()> {
        self.remove(id)?;
        self.release(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Node content
    // ------------------------------------------------------------------

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let changed = match &mut self.node_mut(id)?.data {
            NodeData::Text(t) if *t == text => false,
            NodeData::Text(t) => {
                *t = text.to_string();
                true
            }
            _ => return Err(DomError::NotText(id)),
        };
        if changed {
            self.record(MutationKind::CharacterData, id);
        }
        Ok(())
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?.set_attr(name, value);
        self.record(
            MutationKind::Attributes {
                name: name.to_ascii_lowercase(),
            },
            id,
        );
        Ok(())
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let el = self.element(id).ok_or(DomError::NotAnElement(id))?;
        if el.has_class(class) {
            return Ok(());
        }
        let value = match el.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr(id, "class", &value)
    }

    /// Read one inline style declaration.
    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attr(id, "style")?;
        parse_style(style)
            .into_iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }

    /// Write one inline style declaration, keeping the others in order.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        let mut decls = parse_style(self.attr(id, "style").unwrap_or(""));
        match decls.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        let style = decls
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attr(id, "style", &style)
    }

    /// Runtime value of a form control.
    ///
    /// Until written, an `<input>` reports its `value` attribute and a
    /// `<textarea>` its text content.
    pub fn value(&self, id: NodeId) -> Result<String> {
        let el = self.element(id).ok_or(DomError::NotAnElement(id))?;
        if !el.is_form_control() {
            return Err(DomError::NotAFormControl(id));
        }
        if let Some(v) = &el.value {
            return Ok(v.clone());
        }
        Ok(match el.tag() {
            "textarea" => self.text_content(id),
            _ => el.attr("value").unwrap_or_default().to_string(),
        })
    }

    /// Write the runtime value of a connected, writable form control.
    ///
    /// Like a browser, this does not produce a mutation record.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        let connected = self.is_connected(id);
        let el = self.element_mut(id)?;
        if !el.is_form_control() {
            return Err(DomError::NotAFormControl(id));
        }
        if !connected {
            return Err(DomError::Detached(id));
        }
        if el.is_read_only() {
            return Err(DomError::ReadOnly(id));
        }
        el.value = Some(value.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Frames and canvases
    // ------------------------------------------------------------------

    pub fn attach_frame(&mut self, id: NodeId, content: FrameContent) -> Result<()> {
        let el = self.element_mut(id)?;
        if !el.is_frame() {
            return Err(DomError::NotAFrame(id));
        }
        el.frame = Some(content);
        Ok(())
    }

    fn frame_content(&self, id: NodeId) -> Result<Option<&FrameContent>> {
        let el = self.element(id).ok_or(DomError::NotAnElement(id))?;
        if !el.is_frame() {
            return Err(DomError::NotAFrame(id));
        }
        Ok(el.frame.as_ref())
    }

    /// The embedded document of a frame element, if access is allowed.
    pub fn frame_document(&self, id: NodeId) -> Result<&Document> {
        match self.frame_content(id)? {
            Some(FrameContent::Loaded(doc)) => Ok(doc),
            Some(FrameContent::CrossOrigin) => Err(DomError::CrossOrigin(id)),
            Some(FrameContent::Pending) | None => Err(DomError::FrameNotLoaded(id)),
        }
    }

    pub fn frame_document_mut(&mut self, id: NodeId) -> Result<&mut Document> {
        self.frame_content(id)?;
        match self.element_mut(id)?.frame.as_mut() {
            Some(FrameContent::Loaded(doc)) => Ok(doc),
            Some(FrameContent::CrossOrigin) => Err(DomError::CrossOrigin(id)),
            Some(FrameContent::Pending) | None => Err(DomError::FrameNotLoaded(id)),
        }
    }

    pub fn canvas(&self, id: NodeId) -> Option<&CanvasSurface> {
        self.element(id)?.canvas.as_ref()
    }

    /// Drawing surface of a `<canvas>` element, allocated on first use.
    pub fn canvas_mut(&mut self, id: NodeId) -> Result<&mut CanvasSurface> {
        let el = self.element_mut(id)?;
        if el.tag() != "canvas" {
            return Err(DomError::NotAnElement(id));
        }
        Ok(el.canvas.get_or_insert_with(CanvasSurface::default))
    }

    // ------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------

    pub fn inner_html(&self, id: NodeId) -> String {
        markup::serialize_children(self, id)
    }

    /// Replace the children of `id` with parsed markup. The old children
    /// are freed.
    ///
    /// Serialized markup carries neither frame documents nor the runtime
    /// values of form controls. Both are handed, in document order, from
    /// the old subtree to the matching elements of the new one.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) -> Result<()> {
        self.element_mut(id)?;
        let mut frames = Vec::new();
        let mut values = Vec::new();
        for node in self.descendants(id) {
            let Ok(el) = self.element_mut(node) else {
                continue;
            };
            if el.is_frame() {
                frames.push(el.frame.take());
            } else if el.is_form_control() {
                values.push((el.tag.clone(), el.value.take()));
            }
        }

        for child in self.children(id).to_vec() {
            self.unlink(child);
            self.release(child);
        }
        markup::parse_into(self, id, markup);

        let mut frames = frames.into_iter();
        let mut values = values.into_iter();
        for node in self.descendants(id) {
            let Ok(el) = self.element_mut(node) else {
                continue;
            };
            if el.is_frame() {
                if let Some(Some(content)) = frames.next() {
                    el.frame = Some(content);
                }
            } else if el.is_form_control() {
                match values.next() {
                    Some((tag, value)) if tag == el.tag => el.value = value,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn observe(&mut self, options: ObserveOptions) {
        self.observer = Some(options);
    }

    /// Stop observing and drop any records not yet taken.
    pub fn disconnect(&mut self) {
        self.observer = None;
        self.records.clear();
    }

    pub fn is_observed(&self) -> bool {
        self.observer.is_some()
    }

    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, kind: MutationKind, target: NodeId) {
        let Some(options) = &self.observer else {
            return;
        };
        if !options.accepts(&kind) {
            return;
        }
        let in_scope = if options.subtree {
            self.is_inclusive_descendant(target, self.body)
        } else {
            target == self.body
        };
        if in_scope {
            self.records.push(MutationRecord { kind, target });
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim().to_ascii_lowercase();
            if k.is_empty() {
                return None;
            }
            Some((k, v.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
