// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markup-level substitution.
//!
//! Used when the scope asks to treat the document as markup. Only text runs
//! between tags are matched, so tag names, attribute values and comments are
//! never touched. Text inside raw-text elements, count badges and overlay
//! canvases is copied through unchanged.

use crate::dom::markup::{self, Token};
use crate::dom::{CANVAS_CLASS, COUNT_BADGE_CLASS, HIGHLIGHT_CLASS, HIGHLIGHT_TAG};
use crate::pattern::CompiledPattern;
use crate::results::ResultAggregator;
use crate::rule::HighlightColors;

const PROTECTED_TAGS: &[&str] = &["script", "style", "noscript", "template", "canvas", "textarea", "title"];

/// What a match turns into.
#[derive(Debug, Clone, Copy)]
pub enum Substitution<'a> {
    /// The literal replacement text.
    Replace(&'a str),
    /// A highlight wrapper carrying the match and its running count.
    Wrap(&'a HighlightColors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Plain,
    Wrapper,
    Protected,
}

/// Inline style for a highlight wrapper.
pub fn wrapper_style(colors: &HighlightColors) -> String {
    format!("background-color: {}; color: {}", colors.background, colors.text)
}

/// Markup of one highlight wrapper.
pub fn wrapper_markup(matched: &str, colors: &HighlightColors, index: usize) -> String {
    format!(
        r#"<{tag} class="{class}" style="{style}">{text}<span class="{badge}">{index}</span></{tag}>"#,
        tag = HIGHLIGHT_TAG,
        class = HIGHLIGHT_CLASS,
        style = markup::escape_attr(&wrapper_style(colors)),
        text = markup::escape_text(matched),
        badge = COUNT_BADGE_CLASS,
    )
}

/// Substitute every match in the text runs of `source`.
///
/// Returns `None` when nothing matched, so callers can leave the document
/// alone. When wrapping, nothing inside an existing wrapper is wrapped
/// again; the matches in its text, badge excluded, are counted instead.
pub fn rewrite_markup(
    source: &str,
    pattern: &CompiledPattern,
    substitution: Substitution<'_>,
    key: &str,
    results: &mut ResultAggregator,
) -> Option<String> {
    let mut out = String::with_capacity(source.len());
    let mut stack: Vec<(String, Region)> = Vec::new();
    let mut changed = false;
    let wrapping = matches!(substitution, Substitution::Wrap(_));
    // unescaped text of the outermost open wrapper
    let mut wrapped = String::new();

    for token in markup::tokenize(source) {
        match &token {
            Token::Open {
                name, self_closing, ..
            } => {
                out.push_str(token.raw());
                if *self_closing || markup::is_void(name) {
                    continue;
                }
                let region = if name == HIGHLIGHT_TAG && token.has_class(HIGHLIGHT_CLASS) {
                    Region::Wrapper
                } else if token.has_class(COUNT_BADGE_CLASS)
                    || token.has_class(CANVAS_CLASS)
                    || PROTECTED_TAGS.contains(&name.as_str())
                {
                    Region::Protected
                } else {
                    Region::Plain
                };
                stack.push((name.clone(), region));
            }
            Token::Close { name, raw } => {
                out.push_str(raw);
                if let Some(pos) = stack.iter().rposition(|(open, _)| open == name) {
                    stack.truncate(pos);
                }
                if !in_wrapper(&stack) {
                    count_wrapped(&mut wrapped, pattern, key, results);
                }
            }
            Token::Comment { raw, .. } => out.push_str(raw),
            Token::Text(raw) => {
                if stack.iter().any(|(_, region)| *region == Region::Protected) {
                    out.push_str(raw);
                    continue;
                }
                let text = markup::unescape(raw);
                if wrapping && in_wrapper(&stack) {
                    wrapped.push_str(&text);
                    out.push_str(raw);
                    continue;
                }
                match substitute(&text, pattern, substitution, key, results) {
                    Some(rewritten) => {
                        out.push_str(&rewritten);
                        changed = true;
                    }
                    None => out.push_str(raw),
                }
            }
        }
    }

    count_wrapped(&mut wrapped, pattern, key, results);
    changed.then_some(out)
}

fn in_wrapper(stack: &[(String, Region)]) -> bool {
    stack.iter().any(|(_, region)| *region == Region::Wrapper)
}

fn count_wrapped(
    wrapped: &mut String,
    pattern: &CompiledPattern,
    key: &str,
    results: &mut ResultAggregator,
) {
    for m in pattern.find_iter(wrapped) {
        results.record(key, m.text);
    }
    wrapped.clear();
}

fn substitute(
    text: &str,
    pattern: &CompiledPattern,
    substitution: Substitution<'_>,
    key: &str,
    results: &mut ResultAggregator,
) -> Option<String> {
    let mut out = String::new();
    let mut last = 0;
    let mut matched = false;

    for m in pattern.find_iter(text) {
        matched = true;
        out.push_str(&markup::escape_text(&text[last..m.range.start]));
        results.record(key, m.text);
        match substitution {
            Substitution::Replace(replacement) => out.push_str(&markup::escape_text(replacement)),
            Substitution::Wrap(colors) => out.push_str(&wrapper_markup(m.text, colors, results.total(key))),
        }
        last = m.range.end;
    }

    if !matched {
        return None;
    }
    out.push_str(&markup::escape_text(&text[last..]));
    Some(out)
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
