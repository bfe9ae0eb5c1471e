// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the xword crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{Rule, ScopeFlags, Settings};
use crate::dom::{Document, FrameContent, NodeId};
use crate::results::ResultMap;

/// Creates a temp directory with custom xword.toml content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("xword.toml"), config).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Settings with the given rules and default scope.
pub fn settings(rules: Vec<Rule>) -> Settings {
    Settings {
        rules,
        ..Settings::default()
    }
}

/// Settings with the given rules and scope.
pub fn settings_with_scope(rules: Vec<Rule>, scope: ScopeFlags) -> Settings {
    Settings {
        rules,
        scope,
        ..Settings::default()
    }
}

/// Scope that treats the document as markup.
pub fn markup_scope() -> ScopeFlags {
    ScopeFlags {
        scan_markup: true,
        ..ScopeFlags::default()
    }
}

/// First element with the given tag under the body.
pub fn first(doc: &Document, tag: &str) -> NodeId {
    doc.elements_by_tag(doc.body(), &[tag])
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

/// Attach a loaded document built from `markup` to the first `<iframe>`.
pub fn attach_frame_markup(doc: &mut Document, markup: &str) -> NodeId {
    let frame = first(doc, "iframe");
    doc.attach_frame(frame, FrameContent::Loaded(Box::new(Document::from_markup(markup))))
        .unwrap();
    frame
}

/// Total for `key`, panicking when the key is missing.
pub fn total(results: &ResultMap, key: &str) -> usize {
    results
        .get(key)
        .unwrap_or_else(|| panic!("no result for {key:?}"))
        .total
}

/// Distinct matches for `key`, in insertion order.
pub fn matches(results: &ResultMap, key: &str) -> Vec<String> {
    results
        .get(key)
        .unwrap_or_else(|| panic!("no result for {key:?}"))
        .matches
        .iter()
        .cloned()
        .collect()
}
