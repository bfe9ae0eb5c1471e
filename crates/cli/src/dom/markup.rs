// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markup serialization and a lenient tokenizer/parser.
//!
//! The parser understands what the serializer writes (elements, quoted
//! attributes, escaped text, comments) and tolerates the rest: stray `<`
//! becomes text, unmatched end tags are dropped, unclosed elements close at
//! the end of input. The content of `script`, `style`, `textarea` and
//! `title` is text up to the matching end tag. It is not an HTML5 tree
//! builder.

use memchr::memchr;

use super::{Document, NodeData, NodeId};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is kept verbatim, without character references.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose content is text with character references.
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Tags inside this element are not markup.
fn holds_text_only(tag: &str) -> bool {
    is_raw_text(tag) || ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag)
}

/// One lexical unit of markup. `raw` spans borrow the source verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
        raw: &'a str,
    },
    Close {
        name: String,
        raw: &'a str,
    },
    Text(&'a str),
    Comment {
        body: &'a str,
        raw: &'a str,
    },
}

impl<'a> Token<'a> {
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Open { raw, .. } | Token::Close { raw, .. } | Token::Comment { raw, .. } => raw,
            Token::Text(t) => t,
        }
    }

    /// Value of the `class` attribute on an open tag contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Token::Open { attrs, .. } => attrs
                .iter()
                .any(|(k, v)| k == "class" && v.split_ascii_whitespace().any(|c| c == class)),
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------
// Escaping
// ----------------------------------------------------------------------

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode character references. Unknown references are kept verbatim.
pub fn unescape(text: &str) -> String {
    if memchr(b'&', text.as_bytes()).is_none() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|end| *end <= 10) {
            Some(end) => match decode_reference(&tail[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// ----------------------------------------------------------------------
// Serialization
// ----------------------------------------------------------------------

pub fn serialize_children(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for child in doc.children(id) {
        serialize_node(doc, *child, &mut out);
    }
    out
}

pub fn serialize_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.data(id) {
        Some(NodeData::Element(el)) => {
            out.push('<');
            out.push_str(el.tag());
            for (k, v) in el.attrs() {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }
            out.push('>');
            if is_void(el.tag()) {
                return;
            }
            let raw = is_raw_text(el.tag());
            for child in doc.children(id) {
                match doc.text(*child) {
                    Some(t) if raw => out.push_str(t),
                    _ => serialize_node(doc, *child, out),
                }
            }
            out.push_str("</");
            out.push_str(el.tag());
            out.push('>');
        }
        Some(NodeData::Text(t)) => out.push_str(&escape_text(t)),
        Some(NodeData::Comment(c)) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Some(NodeData::Document) => {
            for child in doc.children(id) {
                serialize_node(doc, *child, out);
            }
        }
        None => {}
    }
}

// ----------------------------------------------------------------------
// Tokenizer
// ----------------------------------------------------------------------

pub fn tokenize(markup: &str) -> Vec<Token<'_>> {
    let bytes = markup.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let lt = pos + offset;
        match read_tag(markup, lt) {
            Some((token, end)) => {
                if text_start < lt {
                    tokens.push(Token::Text(&markup[text_start..lt]));
                }
                let text_until = match &token {
                    Token::Open {
                        name,
                        self_closing: false,
                        ..
                    } if holds_text_only(name) => Some(find_end_tag(markup, end, name)),
                    _ => None,
                };
                tokens.push(token);
                pos = end;
                text_start = end;
                if let Some(close) = text_until {
                    if close > end {
                        tokens.push(Token::Text(&markup[end..close]));
                    }
                    pos = close;
                    text_start = close;
                }
            }
            None => pos = lt + 1,
        }
    }
    if text_start < markup.len() {
        tokens.push(Token::Text(&markup[text_start..]));
    }
    tokens
}

/// Offset of the `</name` end tag at or after `from`, or the end of input.
fn find_end_tag(markup: &str, from: usize, name: &str) -> usize {
    let bytes = markup.as_bytes();
    let mut pos = from;
    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let lt = pos + offset;
        let tail = &bytes[lt..];
        let name_end = 2 + name.len();
        if tail.len() >= name_end
            && tail[1] == b'/'
            && tail[2..name_end].eq_ignore_ascii_case(name.as_bytes())
            && tail
                .get(name_end)
                .is_none_or(|b| *b == b'>' || *b == b'/' || b.is_ascii_whitespace())
        {
            return lt;
        }
        pos = lt + 1;
    }
    markup.len()
}

/// Read a tag starting at `start` (which holds `<`). Returns the token and
/// the byte offset just past it.
fn read_tag(markup: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let rest = &markup[start..];

    if let Some(body) = rest.strip_prefix("<!--") {
        let end = body.find("-->")?;
        let stop = start + 4 + end + 3;
        return Some((
            Token::Comment {
                body: &body[..end],
                raw: &markup[start..stop],
            },
            stop,
        ));
    }

    if let Some(after) = rest.strip_prefix("</") {
        if !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let gt = after.find('>')?;
        let name = after[..gt].trim().to_ascii_lowercase();
        let stop = start + 2 + gt + 1;
        return Some((
            Token::Close {
                name,
                raw: &markup[start..stop],
            },
            stop,
        ));
    }

    let after = &rest[1..];
    if !after.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name_len = after
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .unwrap_or(after.len());
    let name = after[..name_len].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut cursor = &after[name_len..];
    loop {
        cursor = cursor.trim_start();
        if let Some(tail) = cursor.strip_prefix("/>") {
            let stop = markup.len() - tail.len();
            return Some((
                Token::Open {
                    name,
                    attrs,
                    self_closing: true,
                    raw: &markup[start..stop],
                },
                stop,
            ));
        }
        if let Some(tail) = cursor.strip_prefix('>') {
            let stop = markup.len() - tail.len();
            return Some((
                Token::Open {
                    name,
                    attrs,
                    self_closing: false,
                    raw: &markup[start..stop],
                },
                stop,
            ));
        }
        if cursor.is_empty() {
            return None;
        }
        if let Some(tail) = cursor.strip_prefix('/') {
            cursor = tail;
            continue;
        }

        let key_len = cursor
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(cursor.len());
        let key = cursor[..key_len].to_ascii_lowercase();
        cursor = cursor[key_len..].trim_start();

        let value = if let Some(tail) = cursor.strip_prefix('=') {
            let tail = tail.trim_start();
            match tail.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let close = tail[1..].find(q)?;
                    cursor = &tail[1 + close + 1..];
                    unescape(&tail[1..1 + close])
                }
                _ => {
                    let len = tail
                        .find(|c: char| c.is_ascii_whitespace() || c == '>')
                        .unwrap_or(tail.len());
                    cursor = &tail[len..];
                    unescape(&tail[..len])
                }
            }
        } else {
            String::new()
        };
        attrs.push((key, value));
    }
}

// ----------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------

/// Parse `markup` and append the resulting nodes to `parent`.
pub fn parse_into(doc: &mut Document, parent: NodeId, markup: &str) {
    let mut stack: Vec<(NodeId, String)> = Vec::new();

    for token in tokenize(markup) {
        let current = stack.last().map(|(id, _)| *id).unwrap_or(parent);
        match token {
            Token::Open {
                name,
                attrs,
                self_closing,
                ..
            } => {
                let el = doc.create_element(&name);
                for (k, v) in &attrs {
                    // Fresh elements are detached, nothing is recorded.
                    let _ = doc.set_attr(el, k, v);
                }
                let _ = doc.append_child(current, el);
                if !self_closing && !is_void(&name) {
                    stack.push((el, name));
                }
            }
            Token::Close { name, .. } => {
                if let Some(pos) = stack.iter().rposition(|(_, tag)| *tag == name) {
                    stack.truncate(pos);
                }
            }
            Token::Text(raw) => {
                let verbatim = stack.last().is_some_and(|(_, tag)| is_raw_text(tag));
                let text = if verbatim {
                    doc.create_text(raw)
                } else {
                    doc.create_text(&unescape(raw))
                };
                let _ = doc.append_child(current, text);
            }
            Token::Comment { body, .. } => {
                let comment = doc.create_comment(body);
                let _ = doc.append_child(current, comment);
            }
        }
    }
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
