// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use crate::names::KNOWN_NAMESPACES;

/// An input markup dialect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dialect {
    /// SVG or any other markup. Passed through as is.
    Svg,
    /// Android Vector Drawable. Will be converted into SVG.
    VectorDrawable,
}

impl Dialect {
    /// Detects the input dialect by looking at the first start tag.
    ///
    /// XML declaration, processing instructions, comments and DOCTYPE are skipped.
    /// The text itself is not parsed, so a malformed SVG is still detected as `Svg`.
    pub fn detect(text: &str) -> Self {
        match root_start_tag(text) {
            Some(pos) if text[pos..].starts_with("<vector") => Dialect::VectorDrawable,
            _ => Dialect::Svg,
        }
    }
}

/// Returns a byte offset of the first start tag.
pub(crate) fn root_start_tag(text: &str) -> Option<usize> {
    let mut pos = if text.starts_with('\u{feff}') { 3 } else { 0 };
    loop {
        let rest = &text[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if trimmed.starts_with("<?") {
            pos += trimmed.find("?>")? + 2;
        } else if trimmed.starts_with("<!--") {
            pos += trimmed.find("-->")? + 3;
        } else if trimmed.starts_with("<!") {
            pos += skip_doctype(trimmed)?;
        } else if trimmed.starts_with('<') {
            return Some(pos);
        } else {
            return None;
        }
    }
}

fn skip_doctype(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            '>' if depth <= 0 => return Some(i + 1),
            _ => {}
        }
    }

    None
}

/// Maps text positions in a repaired text back to the input text.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct PositionMap {
    // An insertion point in the input and the number of inserted chars.
    insertion: Option<(roxmltree::TextPos, u32)>,
}

impl PositionMap {
    /// Converts a position in the repaired text into a position in the input.
    ///
    /// Positions inside the inserted text point to the insertion point.
    pub fn to_input(&self, pos: roxmltree::TextPos) -> roxmltree::TextPos {
        let (at, len) = match self.insertion {
            Some(v) => v,
            None => return pos,
        };

        if pos.row != at.row || pos.col < at.col {
            return pos;
        }

        let col = if pos.col >= at.col + len {
            pos.col - len
        } else {
            at.col
        };

        roxmltree::TextPos::new(pos.row, col)
    }
}

/// Returns a 1-based row and column of a byte offset, counted the same way as `roxmltree`.
fn text_pos_at(text: &str, offset: usize) -> roxmltree::TextPos {
    let before = &text[..offset];
    let row = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    roxmltree::TextPos::new(row as u32, col as u32)
}

/// Injects `xmlns:*` declarations for well-known Android prefixes
/// that are used but never declared.
///
/// Drawables copied out of a layout or a resource file often lose
/// the namespace declarations, which makes them invalid XML.
pub(crate) fn declare_missing_namespaces(text: &str) -> (Cow<'_, str>, PositionMap) {
    let start = match root_start_tag(text) {
        Some(v) => v,
        None => return (Cow::Borrowed(text), PositionMap::default()),
    };

    let name_len = text[start + 1..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(text.len() - start - 1);
    let name_end = start + 1 + name_len;

    let mut decls = String::new();
    for (prefix, uri) in KNOWN_NAMESPACES {
        if uses_prefix(text, prefix) && !declares_prefix(text, prefix) {
            log::debug!("Namespace prefix '{}' is not declared. Using '{}'.", prefix, uri);
            decls.push_str(&format!(" xmlns:{}=\"{}\"", prefix, uri));
        }
    }

    if decls.is_empty() {
        return (Cow::Borrowed(text), PositionMap::default());
    }

    let positions = PositionMap {
        insertion: Some((text_pos_at(text, name_end), decls.chars().count() as u32)),
    };

    let mut s = String::with_capacity(text.len() + decls.len());
    s.push_str(&text[..name_end]);
    s.push_str(&decls);
    s.push_str(&text[name_end..]);
    (Cow::Owned(s), positions)
}

/// Checks that `prefix:` is used as an element or an attribute name prefix.
fn uses_prefix(text: &str, prefix: &str) -> bool {
    let needle = format!("{}:", prefix);
    text.match_indices(&needle).any(|(idx, _)| {
        text[..idx]
            .chars()
            .next_back()
            .map_or(false, |c| c.is_whitespace() || c == '<' || c == '/')
    })
}

fn declares_prefix(text: &str, prefix: &str) -> bool {
    let needle = format!("xmlns:{}", prefix);
    text.match_indices(&needle).any(|(idx, _)| {
        text[idx + needle.len()..]
            .chars()
            .next()
            .map_or(false, |c| c == '=' || c.is_whitespace())
    })
}
