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

//! Structural containment
//!
//! "Container contains needle as a subtree": some descendant of the
//! container (the container itself included) is semantically equal to the
//! needle. Sublist matching is exact by length and positions - `(a b c)`
//! does not contain `(a b)`.
//!
//! The scan is layered to make negative answers cheap:
//!
//! 1. Bloom reject: if the needle's signature has a bit the container's
//!    lacks, containment is impossible; return without walking.
//! 2. Type filter: only compare a node whose entry kind matches the
//!    needle's, and only descend into children that either match the
//!    needle's kind or are lists (only lists can nest further).
//! 3. Tag-byte quick check, then full semantic equality.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::core::{EntryKind, Result};
use crate::ops::{eq, hash, OpContext};

/// Entry-table offsets to prefetch ahead while scanning a large list
const PREFETCH_AHEAD: usize = 4;

/// Does `container` contain `needle` as a subtree?
pub fn contains(ctx: &OpContext, container: &Sexp, needle: &Sexp) -> Result<bool> {
    let container_reader = SexpReader::new(container.as_bytes())?;
    let needle_reader = SexpReader::new(needle.as_bytes())?;
    let container_cur = container_reader.cursor();
    let needle_cur = needle_reader.cursor();

    // Bloom reject eliminates most negative queries without a scan
    let container_sig = hash::element_bloom(&container_cur)?;
    let needle_sig = hash::element_bloom(&needle_cur)?;
    if !container_sig.may_contain(needle_sig) {
        return Ok(false);
    }

    let needle_first = needle_cur.peek_byte()?;
    scan(
        ctx,
        &container_cur,
        &needle_cur,
        needle_first,
        EntryKind::from_tag_byte(needle_first),
    )
}

/// Recursive type-filtered scan for one node and its descendants
fn scan(
    ctx: &OpContext,
    node: &Cursor<'_>,
    needle: &Cursor<'_>,
    needle_first: u8,
    needle_kind: EntryKind,
) -> Result<bool> {
    let byte = node.peek_byte()?;
    let node_kind = EntryKind::from_tag_byte(byte);

    // Quick reject on the tag byte: canonical encodings give equal values
    // equal first bytes, so a mismatch rules out equality at this node
    if node_kind == needle_kind && byte == needle_first {
        let mut node_walk = node.clone();
        let mut needle_walk = needle.clone();
        if eq::elements_equal(&mut node_walk, &mut needle_walk)? {
            return Ok(true);
        }
    }

    if node_kind != EntryKind::List {
        return Ok(false);
    }

    let mut cur = node.clone();
    let tag = cur.read_tag_byte()?;
    let header = cur.read_list_header(tag)?;

    if header.is_large() {
        for p in 0..header.count.min(PREFETCH_AHEAD) {
            if let Ok((start, _)) = cur.child_bounds(&header, p) {
                cur.prefetch(start);
            }
        }
        for i in 0..header.count {
            ctx.check()?;
            if i + PREFETCH_AHEAD < header.count {
                if let Ok((start, _)) = cur.child_bounds(&header, i + PREFETCH_AHEAD) {
                    cur.prefetch(start);
                }
            }
            // Entry kinds let us skip children that can neither equal the
            // needle nor contain it
            let entry = header
                .entry(i)
                .ok_or(crate::core::Error::Truncated("entry table"))?;
            if entry.kind() != needle_kind && entry.kind() != EntryKind::List {
                continue;
            }
            let (start, _) = cur.child_bounds(&header, i)?;
            if scan(ctx, &cur.at(start), needle, needle_first, needle_kind)? {
                return Ok(true);
            }
        }
    } else {
        let mut walk = cur.at(header.data_start);
        for _ in 0..header.count {
            ctx.check()?;
            let child_start = walk.pos();
            let child_kind = EntryKind::from_tag_byte(walk.peek_byte()?);
            walk.skip_element()?;
            if child_kind != needle_kind && child_kind != EntryKind::List {
                continue;
            }
            if scan(ctx, &walk.at(child_start), needle, needle_first, needle_kind)? {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
