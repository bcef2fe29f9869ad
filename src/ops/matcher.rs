// Copyright 2025 Lisq Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pattern matching
//!
//! Patterns are ordinary values in which certain symbols act as operators:
//!
//! - `_` matches exactly one element
//! - `_*` matches zero or more trailing elements; must be the last element
//!   of its pattern list, anywhere else the pattern fails to match
//! - `?name` captures one element; `??name` captures the rest
//! - anything else is a literal and matches by semantic equality
//!
//! Capture symbols are accepted for pattern compatibility but matched as
//! their wildcard forms; no bindings are surfaced.
//!
//! [`matches`] tests the pattern at the root. [`find_first`] searches the
//! expression depth-first, pre-order, left to right, and extracts the
//! first matching subtree as a standalone value.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::core::types::{TAG_MASK, TAG_SYMBOL};
use crate::core::{EntryKind, Result};

/// Role a symbol plays inside a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternRole {
    /// `_` or `?name`: exactly one element
    One,
    /// `_*` or `??name`: the rest of the enclosing list
    Rest,
}

/// Classify a symbol's pattern role, if it has one
fn pattern_role(text: &[u8]) -> Option<PatternRole> {
    match text {
        b"_" => Some(PatternRole::One),
        b"_*" => Some(PatternRole::Rest),
        _ if text.starts_with(b"??") => Some(PatternRole::Rest),
        _ if text.starts_with(b"?") => Some(PatternRole::One),
        _ => None,
    }
}

/// Does `expr` match `pattern` at the root?
pub fn matches(expr: &Sexp, pattern: &Sexp) -> Result<bool> {
    let expr_reader = SexpReader::new(expr.as_bytes())?;
    let pattern_reader = SexpReader::new(pattern.as_bytes())?;
    elements_match(&mut expr_reader.cursor(), &mut pattern_reader.cursor())
}

/// First subtree of `expr` matching `pattern`, or None
pub fn find_first(expr: &Sexp, pattern: &Sexp) -> Result<Option<Sexp>> {
    let expr_reader = SexpReader::new(expr.as_bytes())?;
    let pattern_reader = SexpReader::new(pattern.as_bytes())?;
    let pattern_root = pattern_reader.cursor();

    match find_at(&expr_reader.cursor(), &pattern_root)? {
        Some((start, end)) => {
            let reader_cursor = expr_reader.cursor();
            let element = reader_cursor.slice(start, end)?;
            Ok(Some(Sexp::from_header_and_element(
                expr_reader.header_bytes(),
                element,
            )))
        }
        None => Ok(None),
    }
}

/// Depth-first pre-order search; returns the matching element's bounds
fn find_at(node: &Cursor<'_>, pattern: &Cursor<'_>) -> Result<Option<(usize, usize)>> {
    // Try this node first
    {
        let mut expr_walk = node.clone();
        let mut pattern_walk = pattern.clone();
        if elements_match(&mut expr_walk, &mut pattern_walk)? {
            return node.element_bounds().map(Some);
        }
    }

    // Then its children, left to right
    let mut cur = node.clone();
    let byte = cur.read_tag_byte()?;
    if EntryKind::from_tag_byte(byte) == EntryKind::List {
        let header = cur.read_list_header(byte)?;
        for i in 0..header.count {
            let (start, _) = cur.child_bounds(&header, i)?;
            if let Some(found) = find_at(&cur.at(start), pattern)? {
                return Ok(Some(found));
            }
        }
    }
    Ok(None)
}

/// Match one expression element against one pattern element, advancing
/// both cursors on success
fn elements_match(expr: &mut Cursor<'_>, pattern: &mut Cursor<'_>) -> Result<bool> {
    // Pattern operators are symbols; check before literal matching
    if pattern.peek_byte()? & TAG_MASK == TAG_SYMBOL {
        let mut probe = pattern.clone();
        probe.read_tag_byte()?;
        let symbol = probe.read_symbol_body()?;
        match pattern_role(symbol.text) {
            Some(PatternRole::One) => {
                expr.skip_element()?;
                *pattern = probe;
                return Ok(true);
            }
            Some(PatternRole::Rest) => {
                // Rest is only meaningful at list level; as a standalone
                // element position it cannot match
                return Ok(false);
            }
            None => {}
        }
    }

    let expr_byte = expr.read_tag_byte()?;
    let pattern_byte = pattern.read_tag_byte()?;
    let expr_kind = EntryKind::from_tag_byte(expr_byte);
    let pattern_kind = EntryKind::from_tag_byte(pattern_byte);
    if expr_kind != pattern_kind {
        return Ok(false);
    }

    match expr_kind {
        EntryKind::Nil => Ok(true),
        EntryKind::Integer => {
            Ok(expr.read_integer_body(expr_byte)? == pattern.read_integer_body(pattern_byte)?)
        }
        EntryKind::Float => Ok(expr.read_f64()? == pattern.read_f64()?),
        EntryKind::Symbol => {
            let expr_sym = expr.read_symbol_body()?;
            let pattern_sym = pattern.read_symbol_body()?;
            Ok(expr_sym.hash == pattern_sym.hash && expr_sym.text == pattern_sym.text)
        }
        EntryKind::String => {
            Ok(expr.read_string_body(expr_byte)? == pattern.read_string_body(pattern_byte)?)
        }
        EntryKind::List => match_lists(expr, pattern, expr_byte, pattern_byte),
    }
}

/// Match list children, handling trailing rest patterns
fn match_lists(
    expr: &mut Cursor<'_>,
    pattern: &mut Cursor<'_>,
    expr_byte: u8,
    pattern_byte: u8,
) -> Result<bool> {
    let expr_header = expr.read_list_header(expr_byte)?;
    let pattern_header = pattern.read_list_header(pattern_byte)?;

    let mut expr_i = 0usize;
    for pattern_i in 0..pattern_header.count {
        // A rest pattern consumes every remaining expression element, but
        // only from the terminal position
        if pattern.peek_byte()? & TAG_MASK == TAG_SYMBOL {
            let mut probe = pattern.clone();
            probe.read_tag_byte()?;
            let symbol = probe.read_symbol_body()?;
            if pattern_role(symbol.text) == Some(PatternRole::Rest) {
                if pattern_i + 1 != pattern_header.count {
                    return Ok(false);
                }
                while expr_i < expr_header.count {
                    expr.skip_element()?;
                    expr_i += 1;
                }
                *pattern = probe;
                return Ok(true);
            }
        }

        if expr_i >= expr_header.count {
            return Ok(false);
        }
        if !elements_match(expr, pattern)? {
            return Ok(false);
        }
        expr_i += 1;
    }

    Ok(expr_i == expr_header.count)
}
