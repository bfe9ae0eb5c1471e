// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replace and highlight passes over a document.
//!
//! A pass snapshots the active rules, compiles their patterns once, and runs
//! them over the top document, every accessible frame and (for replacement)
//! the form controls in scope. Every active rule gets an entry in the
//! result map, in rule order, even when it matched nothing or failed to
//! compile.

use crate::config::Settings;
use crate::dom::{Document, NodeId};
use crate::geometry::{FixedPitch, Geometry};
use crate::highlight::{HighlightStrategy, OverlayHandler, StructuralHandler};
use crate::inputs::InputFieldProcessor;
use crate::pattern::CompiledPattern;
use crate::replace::ReplaceHandler;
use crate::results::{ResultAggregator, ResultMap};
use crate::rewrite::{self, Substitution};
use crate::rule::ActiveRule;
use crate::walker::{DocumentWalker, NodeHandler, WalkOptions};

const FRAME_TAGS: &[&str] = &["iframe", "frame"];

pub struct Engine {
    geometry: Box<dyn Geometry>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Box::new(FixedPitch::default()))
    }
}

impl Engine {
    pub fn new(geometry: Box<dyn Geometry>) -> Self {
        Self { geometry }
    }

    /// Replace every match of every active rule.
    pub fn replace(&self, doc: &mut Document, settings: &Settings) -> ResultMap {
        let rules = ActiveRule::prepare(settings);
        let mut results = aggregator_for(&rules);
        let options = WalkOptions::from(&settings.scope);

        for rule in &rules {
            let Some(pattern) = &rule.pattern else {
                continue;
            };
            let mut handler = ReplaceHandler::new(rule);
            if settings.scope.scan_markup {
                let substitution = Substitution::Replace(&rule.replace);
                let pass = MarkupPass {
                    rule,
                    pattern,
                    substitution,
                    options,
                };
                pass.run(doc, &mut handler, &mut results);
            } else {
                let body = doc.body();
                DocumentWalker::new(options).walk(doc, body, &mut handler, &mut results);
            }
        }

        tracing::debug!("replace pass over {} rules", rules.len());
        results.into_map()
    }

    /// Highlight every match of every active rule.
    pub fn highlight(&self, doc: &mut Document, settings: &Settings) -> ResultMap {
        let rules = ActiveRule::prepare(settings);
        let mut results = aggregator_for(&rules);
        let options = WalkOptions::from(&settings.scope);

        match HighlightStrategy::for_scope(&settings.scope) {
            HighlightStrategy::Structural => {
                for rule in &rules {
                    let Some(pattern) = &rule.pattern else {
                        continue;
                    };
                    let mut handler = StructuralHandler::new(rule);
                    let pass = MarkupPass {
                        rule,
                        pattern,
                        substitution: Substitution::Wrap(&rule.colors),
                        options,
                    };
                    pass.run(doc, &mut handler, &mut results);
                }
            }
            HighlightStrategy::Overlay => {
                let alpha = settings.highlight.overlay_alpha;
                let mut handler = OverlayHandler::new(&rules, self.geometry.as_ref(), alpha);
                let body = doc.body();
                DocumentWalker::new(options).walk(doc, body, &mut handler, &mut results);
            }
        }

        tracing::debug!("highlight pass over {} rules", rules.len());
        results.into_map()
    }
}

fn aggregator_for(rules: &[ActiveRule]) -> ResultAggregator {
    ResultAggregator::new(rules.iter().map(|r| r.key.as_str()))
}

/// One rule applied in markup scope.
///
/// The top body and each top-level frame body are rewritten as markup.
/// Frames nested inside those are walked node by node with `handler`.
/// Form controls are only touched when replacing: top-level frames first,
/// then the top document.
struct MarkupPass<'a> {
    rule: &'a ActiveRule,
    pattern: &'a CompiledPattern,
    substitution: Substitution<'a>,
    options: WalkOptions,
}

impl MarkupPass<'_> {
    fn run(&self, doc: &mut Document, handler: &mut dyn NodeHandler, results: &mut ResultAggregator) {
        let walker = DocumentWalker::new(self.options);
        let edits_controls =
            self.options.scan_input_fields && matches!(self.substitution, Substitution::Replace(_));

        if self.options.scan_webpage_text {
            let body = doc.body();
            self.rewrite(doc, body, results);
        }

        let top_body = doc.body();
        for frame in doc.elements_by_tag(top_body, FRAME_TAGS) {
            let inner = match doc.frame_document_mut(frame) {
                Ok(inner) => inner,
                Err(e) => {
                    tracing::debug!("skipping frame: {}", e);
                    continue;
                }
            };
            let body = inner.body();
            if self.options.scan_webpage_text {
                self.rewrite(inner, body, results);
            }
            if edits_controls {
                let controls = InputFieldProcessor::controls(inner, body);
                InputFieldProcessor::new(self.rule).apply_all(inner, &controls, results);
            }
            for nested in inner.elements_by_tag(body, FRAME_TAGS) {
                walker.walk_frame(inner, nested, handler, results);
            }
        }

        if edits_controls {
            let controls = InputFieldProcessor::controls(doc, top_body);
            InputFieldProcessor::new(self.rule).apply_all(doc, &controls, results);
        }
    }

    fn rewrite(&self, doc: &mut Document, root: NodeId, results: &mut ResultAggregator) {
        let source = doc.inner_html(root);
        let Some(rewritten) =
            rewrite::rewrite_markup(&source, self.pattern, self.substitution, &self.rule.key, results)
        else {
            return;
        };
        if let Err(e) = doc.set_inner_html(root, &rewritten) {
            tracing::warn!("failed to rewrite markup: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
