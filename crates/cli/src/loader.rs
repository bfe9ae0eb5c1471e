// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document files.
//!
//! A document file holds body markup. Frame elements are resolved from
//! their attributes: `srcdoc` and blank sources give same-origin documents,
//! remote sources are cross-origin, and relative sources load sibling files.
//! A relative source that does not exist yet leaves the frame pending.

use std::path::Path;

use crate::dom::{Document, FrameContent, NodeId};
use crate::error::{Error, Result};

const FRAME_TAGS: &[&str] = &["iframe", "frame"];

/// Nested frames deeper than this are left pending.
const MAX_FRAME_DEPTH: usize = 8;

pub fn load_document(path: &Path) -> Result<Document> {
    load_at_depth(path, 0)
}

/// Write the body markup of `doc` to `path`. Frame documents are not saved.
pub fn save_document(doc: &Document, path: &Path) -> Result<()> {
    std::fs::write(path, doc.inner_html(doc.body())).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_at_depth(path: &Path, depth: usize) -> Result<Document> {
    let markup = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut doc = Document::from_markup(&markup);
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let body = doc.body();
    for frame in doc.elements_by_tag(body, FRAME_TAGS) {
        let content = resolve_frame(&doc, frame, base, depth);
        doc.attach_frame(frame, content)?;
    }
    Ok(doc)
}

fn resolve_frame(doc: &Document, frame: NodeId, base: &Path, depth: usize) -> FrameContent {
    if let Some(srcdoc) = doc.attr(frame, "srcdoc") {
        return FrameContent::Loaded(Box::new(Document::from_markup(srcdoc)));
    }

    let src = doc.attr(frame, "src").unwrap_or("").trim();
    if src.is_empty() || src == "about:blank" {
        return FrameContent::Loaded(Box::default());
    }
    if is_remote(src) {
        return FrameContent::CrossOrigin;
    }

    let path = base.join(src);
    if depth >= MAX_FRAME_DEPTH || !path.is_file() {
        tracing::debug!("frame source {} not available", path.display());
        return FrameContent::Pending;
    }
    match load_at_depth(&path, depth + 1) {
        Ok(inner) => FrameContent::Loaded(Box::new(inner)),
        Err(e) => {
            tracing::debug!("{}", e);
            FrameContent::Pending
        }
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("//") || src.split_once("://").is_some_and(|(scheme, _)| scheme != "file")
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
