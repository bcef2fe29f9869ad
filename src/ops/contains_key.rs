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

//! Key-based containment
//!
//! Treats list heads as keys, the way object keys work in document stores:
//! `(user (name "alice") (age 30))` key-contains `(user (age 30))` even
//! though the tails differ in order and the container has extra fields.
//!
//! Rules for "container key-contains needle":
//!
//! - needle atom: equal to some descendant (as in structural containment)
//! - needle list vs container list: heads must be equal, and every needle
//!   tail element must key-match some container tail element; order among
//!   tails is irrelevant and the container may have unmatched extras
//! - the match may also hold at any descendant of the container
//!
//! Tail matching is scan-and-consume: a container tail element satisfies
//! at most one needle tail element, first come first matched. No maximum
//! matching is attempted.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::core::{EntryKind, Result};
use crate::ops::{eq, hash, OpContext};

/// Does `container` key-contain `needle`?
pub fn contains_key(ctx: &OpContext, container: &Sexp, needle: &Sexp) -> Result<bool> {
    let container_reader = SexpReader::new(container.as_bytes())?;
    let needle_reader = SexpReader::new(needle.as_bytes())?;
    let container_cur = container_reader.cursor();
    let needle_cur = needle_reader.cursor();

    // Key-based matching relaxes ordering and arity, so the needle side
    // uses the atom-only signature: its list-count bits would reject
    // containers whose matching lists are wider than the needle's
    let container_sig = hash::element_bloom(&container_cur)?;
    let needle_sig = hash::element_atom_bloom(&needle_cur)?;
    if !container_sig.may_contain(needle_sig) {
        return Ok(false);
    }

    let needle_kind = EntryKind::from_tag_byte(needle_cur.peek_byte()?);
    search(ctx, &container_cur, &needle_cur, needle_kind)
}

/// Try the key match at this node, then at every descendant
fn search(
    ctx: &OpContext,
    node: &Cursor<'_>,
    needle: &Cursor<'_>,
    needle_kind: EntryKind,
) -> Result<bool> {
    let node_kind = EntryKind::from_tag_byte(node.peek_byte()?);

    if needle_kind != EntryKind::List {
        if node_kind == needle_kind {
            let mut node_walk = node.clone();
            let mut needle_walk = needle.clone();
            if eq::elements_equal(&mut node_walk, &mut needle_walk)? {
                return Ok(true);
            }
        }
    } else if node_kind == EntryKind::List && key_lists_match(ctx, node, needle)? {
        return Ok(true);
    }

    if node_kind != EntryKind::List {
        return Ok(false);
    }

    // Descend: a needle list can only match list children; an atom needle
    // can match same-kind children or hide deeper inside list children
    let mut cur = node.clone();
    let tag = cur.read_tag_byte()?;
    let header = cur.read_list_header(tag)?;
    for i in 0..header.count {
        ctx.check()?;
        let child_kind = if header.is_large() {
            header
                .entry(i)
                .ok_or(crate::core::Error::Truncated("entry table"))?
                .kind()
        } else {
            let (start, _) = cur.child_bounds(&header, i)?;
            EntryKind::from_tag_byte(cur.at(start).peek_byte()?)
        };
        let descend = if needle_kind == EntryKind::List {
            child_kind == EntryKind::List
        } else {
            child_kind == needle_kind || child_kind == EntryKind::List
        };
        if !descend {
            continue;
        }
        let (start, _) = cur.child_bounds(&header, i)?;
        if search(ctx, &cur.at(start), needle, needle_kind)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Key match of two lists at the same level
fn key_lists_match(ctx: &OpContext, container: &Cursor<'_>, needle: &Cursor<'_>) -> Result<bool> {
    let mut c_cur = container.clone();
    let c_tag = c_cur.read_tag_byte()?;
    let c_header = c_cur.read_list_header(c_tag)?;

    let mut n_cur = needle.clone();
    let n_tag = n_cur.read_tag_byte()?;
    let n_header = n_cur.read_list_header(n_tag)?;

    if n_header.count == 0 {
        return Ok(true);
    }
    // Container must cover the needle's element count
    if c_header.count < n_header.count {
        return Ok(false);
    }

    // Heads must be equal
    {
        let (c_start, _) = c_cur.child_bounds(&c_header, 0)?;
        let (n_start, _) = n_cur.child_bounds(&n_header, 0)?;
        let mut c_head = c_cur.at(c_start);
        let mut n_head = n_cur.at(n_start);
        if !eq::elements_equal(&mut c_head, &mut n_head)? {
            return Ok(false);
        }
    }

    if n_header.count == 1 {
        return Ok(true);
    }

    // Scan-and-consume: each container tail slot satisfies one needle
    // element at most
    let mut consumed = vec![false; c_header.count];
    for ni in 1..n_header.count {
        let (n_start, _) = n_cur.child_bounds(&n_header, ni)?;
        let n_elem = n_cur.at(n_start);
        let n_kind = EntryKind::from_tag_byte(n_elem.peek_byte()?);

        let mut found = false;
        for ci in 1..c_header.count {
            ctx.check()?;
            if consumed[ci] {
                continue;
            }
            let (c_start, _) = c_cur.child_bounds(&c_header, ci)?;
            let c_elem = c_cur.at(c_start);
            let c_kind = EntryKind::from_tag_byte(c_elem.peek_byte()?);

            // Type reject before comparing
            if n_kind != EntryKind::List && c_kind != n_kind {
                continue;
            }
            if element_key_matches(ctx, &c_elem, &n_elem, n_kind)? {
                consumed[ci] = true;
                found = true;
                break;
            }
        }
        if !found {
            return Ok(false);
        }
    }
    Ok(true)
}

/// One tail element against one container element: equality for atoms,
/// recursive key matching for lists
fn element_key_matches(
    ctx: &OpContext,
    container_elem: &Cursor<'_>,
    needle_elem: &Cursor<'_>,
    needle_kind: EntryKind,
) -> Result<bool> {
    if needle_kind != EntryKind::List {
        let mut c = container_elem.clone();
        let mut n = needle_elem.clone();
        return eq::elements_equal(&mut c, &mut n);
    }
    if EntryKind::from_tag_byte(container_elem.peek_byte()?) != EntryKind::List {
        return Ok(false);
    }
    key_lists_match(ctx, container_elem, needle_elem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(container: &str, needle: &str) -> bool {
        contains_key(
            &OpContext::default(),
            &Sexp::parse(container).unwrap(),
            &Sexp::parse(needle).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_atom_needle_behaves_structurally() {
        assert!(check("(user (age 30))", "user"));
        assert!(check("(user (age 30))", "30"));
        assert!(!check("(user (age 30))", "31"));
    }

    #[test]
    fn test_heads_as_keys() {
        let data = "(user (name \"alice\") (age 30))";
        assert!(check(data, "(user (age 30))"));
        assert!(check(data, "(user (name \"alice\"))"));
        assert!(check(data, "(user (name \"alice\") (age 30))"));
        // Tail order irrelevant
        assert!(check(data, "(user (age 30) (name \"alice\"))"));
        // Wrong value
        assert!(!check(data, "(user (name \"bob\"))"));
        // Wrong head
        assert!(!check(data, "(account (age 30))"));
    }

    #[test]
    fn test_order_independent_numbers() {
        assert!(check("(+ 1 2 3)", "(+ 2 1)"));
        assert!(check("(+ 1 2 3)", "(+ 3)"));
        assert!(!check("(+ 1 2)", "(+ 1 2 3)"));
    }

    #[test]
    fn test_container_may_have_extras() {
        assert!(check("(cfg (a 1) (b 2) (c 3))", "(cfg (b 2))"));
        assert!(check("(cfg (a 1) (b 2) (c 3))", "(cfg)"));
        // The needle's list arity (3) appears nowhere in the container
        // (lists of 4 and 2); only atom signatures may gate the scan
        assert!(check("(cfg (a 1) (b 2) (c 3))", "(cfg (a 1) (b 2))"));
    }

    #[test]
    fn test_atom_bloom_soundness() {
        // Whenever key containment holds, the needle's atom-only signature
        // is a subset of the container's full signature
        let cases = [
            ("(user (a 1) (b 2) (c 3))", "(user (a 1) (b 2))"),
            ("(+ 1 2 3)", "(+ 3 1)"),
            ("(k (m (n 5) (o 6)) (p 7))", "(k (m (o 6)))"),
        ];
        for (container_text, needle_text) in cases {
            assert!(check(container_text, needle_text));
            let container = Sexp::parse(container_text).unwrap();
            let needle = Sexp::parse(needle_text).unwrap();
            let container_reader =
                crate::binary::SexpReader::new(container.as_bytes()).unwrap();
            let needle_reader = crate::binary::SexpReader::new(needle.as_bytes()).unwrap();
            let container_sig = hash::element_bloom(&container_reader.cursor()).unwrap();
            let needle_sig = hash::element_atom_bloom(&needle_reader.cursor()).unwrap();
            assert!(
                container_sig.may_contain(needle_sig),
                "atom bloom rejected key-contained {needle_text} in {container_text}"
            );
        }
    }

    #[test]
    fn test_match_at_descendant() {
        let data = "(root (user (name \"alice\") (age 30)))";
        assert!(check(data, "(user (age 30))"));
        assert!(check("(a (b (c (user (id 7) (x y)))))", "(user (id 7))"));
    }

    #[test]
    fn test_nested_key_matching() {
        let data = "(user (profile (city \"oslo\") (zip 1234)) (age 30))";
        assert!(check(data, "(user (profile (zip 1234)))"));
        assert!(!check(data, "(user (profile (zip 9999)))"));
    }

    #[test]
    fn test_scan_and_consume_repeated_tails() {
        // One container element cannot satisfy two needle elements
        assert!(check("(s 1 1)", "(s 1 1)"));
        assert!(!check("(s 1)", "(s 1 1)"));
        assert!(check("(s 1 2 1)", "(s 1 1)"));
    }

    #[test]
    fn test_list_head_may_be_list() {
        // A list head must match structurally pairwise
        assert!(check("((a b) 1 2)", "((a b) 2)"));
        assert!(!check("((a b) 1 2)", "((a c) 2)"));
    }

    #[test]
    fn test_self_key_containment() {
        for text in ["(user (age 30))", "(k 1 2 3)", "plain", "42"] {
            assert!(check(text, text), "contains_key({text}, {text})");
        }
    }
}
