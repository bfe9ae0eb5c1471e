// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Highlight rendering strategies.
//!
//! Structural highlighting edits the tree: each match is split out of its
//! text node and wrapped in a colored element with a running count badge.
//! Overlay highlighting leaves the text alone and paints translucent
//! rectangles on a canvas stacked over each matching container.

pub mod overlay;
pub mod structural;

pub use overlay::{OverlayHandler, OverlayRect};
pub use structural::StructuralHandler;

use crate::config::ScopeFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStrategy {
    Structural,
    Overlay,
}

impl HighlightStrategy {
    /// Markup scope highlights structurally; everything else uses overlays.
    pub fn for_scope(scope: &ScopeFlags) -> Self {
        if scope.scan_markup {
            HighlightStrategy::Structural
        } else {
            HighlightStrategy::Overlay
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
