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

//! Inverted-index key extraction
//!
//! Each stored value yields a set of 32-bit integer keys for posting-list
//! indexing. A stored value is a candidate for a containment query iff the
//! query's keys are a subset of the value's keys; candidates are verified
//! by a full containment recheck.
//!
//! Extraction rules:
//!
//! - every atom yields one key from its kind marker and content hash
//! - a 2-element list whose head is a symbol yields one highly selective
//!   pair key (and no list-head key)
//! - every other non-empty list yields a list-head key from its first
//!   element's content hash
//! - children are always recursed into
//!
//! Query-side extraction differs by strategy: key-based containment must
//! not emit pair keys (the stored `(user (id 100) (name ...))` has no
//! `user` pair key for the query `(user (id 100))` to match), and
//! contained-by queries cannot be pre-filtered at all.
//!
//! Keys are deduplicated through an open-addressed [`KeySet`] and capped
//! at [`MAX_KEYS`]; the high bit of every key is forced on so no key
//! collides with the set's empty-slot sentinel.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::codec::hash::{combine, hash_bytes, hash_f64, hash_i64, hash_u32};
use crate::common::KeySet;
use crate::core::types::{TAG_MASK, TAG_SYMBOL};
use crate::core::{EntryKind, Result, MAX_KEYS};
use crate::index::consistent::Strategy;
use crate::ops::{hash, OpContext};

/// Key-type markers, mixed into the hash to keep key spaces apart
pub const KEY_TYPE_ATOM: u32 = 0x0100_0000;
pub const KEY_TYPE_LIST_HEAD: u32 = 0x0200_0000;
pub const KEY_TYPE_SYMBOL: u32 = 0x0300_0000;
pub const KEY_TYPE_STRING: u32 = 0x0400_0000;
pub const KEY_TYPE_INTEGER: u32 = 0x0500_0000;
pub const KEY_TYPE_FLOAT: u32 = 0x0600_0000;
pub const KEY_TYPE_PAIR: u32 = 0x0700_0000;

/// Pre-filtering mode a query asks of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Candidates must hold every query key
    Default,
    /// No useful keys; scan the full index and recheck everything
    All,
}

/// Keys extracted from a query value
#[derive(Debug, Clone)]
pub struct QueryKeys {
    pub keys: Vec<i32>,
    pub search_mode: SearchMode,
}

/// Build an index key from a type marker and content hash
///
/// The high bit is forced on: key 0 and the dedup sentinel stay unused.
fn make_key(marker: u32, content_hash: u32) -> i32 {
    ((marker ^ content_hash) | 0x8000_0000) as i32
}

/// Extract posting keys from a stored value
pub fn extract_value_keys(ctx: &OpContext, value: &Sexp) -> Result<Vec<i32>> {
    let reader = SexpReader::new(value.as_bytes())?;
    let mut keys = Vec::with_capacity(64);
    let mut seen = KeySet::new();
    extract(
        ctx,
        &reader.cursor(),
        &mut keys,
        &mut seen,
        Extraction::Value,
    )?;
    if keys.is_empty() {
        // Every value gets at least one posting
        keys.push(make_key(KEY_TYPE_ATOM, 0));
    }
    Ok(keys)
}

/// Extract probe keys from a query value under an operator strategy
pub fn extract_query_keys(ctx: &OpContext, query: &Sexp, strategy: Strategy) -> Result<QueryKeys> {
    let mode = match strategy {
        Strategy::Structural => Extraction::StructuralQuery,
        Strategy::KeyBased => Extraction::KeyBasedQuery,
        Strategy::ContainedBy => {
            return Ok(QueryKeys {
                keys: Vec::new(),
                search_mode: SearchMode::All,
            });
        }
    };

    let reader = SexpReader::new(query.as_bytes())?;
    let mut keys = Vec::with_capacity(64);
    let mut seen = KeySet::new();
    extract(ctx, &reader.cursor(), &mut keys, &mut seen, mode)?;
    if keys.is_empty() {
        keys.push(make_key(KEY_TYPE_ATOM, 0));
    }
    Ok(QueryKeys {
        keys,
        search_mode: SearchMode::Default,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extraction {
    /// Stored-value side: pair keys for symbol-headed pairs
    Value,
    /// Structural query: identical to the value side, so query keys are
    /// always a subset of a containing value's keys
    StructuralQuery,
    /// Key-based query: no pair keys (the stored list may be wider than
    /// the query pair)
    KeyBasedQuery,
}

fn add_key(keys: &mut Vec<i32>, seen: &mut KeySet, key: i32) {
    if keys.len() >= MAX_KEYS {
        return;
    }
    if seen.insert(key) {
        keys.push(key);
    }
}

fn extract(
    ctx: &OpContext,
    node: &Cursor<'_>,
    keys: &mut Vec<i32>,
    seen: &mut KeySet,
    mode: Extraction,
) -> Result<()> {
    if keys.len() >= MAX_KEYS {
        return Ok(());
    }

    let byte = node.peek_byte()?;
    match EntryKind::from_tag_byte(byte) {
        EntryKind::Nil => {
            add_key(keys, seen, make_key(KEY_TYPE_ATOM, hash_u32(0)));
        }

        EntryKind::Integer => {
            let mut cur = node.clone();
            let tag = cur.read_tag_byte()?;
            let value = cur.read_integer_body(tag)?;
            add_key(keys, seen, make_key(KEY_TYPE_INTEGER, hash_i64(value)));
        }

        EntryKind::Float => {
            let mut cur = node.clone();
            cur.read_tag_byte()?;
            let value = cur.read_f64()?;
            add_key(keys, seen, make_key(KEY_TYPE_FLOAT, hash_f64(value)));
        }

        EntryKind::Symbol => {
            let mut cur = node.clone();
            cur.read_tag_byte()?;
            let entry = cur.read_symbol_body()?;
            add_key(keys, seen, make_key(KEY_TYPE_SYMBOL, entry.hash));
        }

        EntryKind::String => {
            let mut cur = node.clone();
            let tag = cur.read_tag_byte()?;
            let content = cur.read_string_body(tag)?;
            add_key(keys, seen, make_key(KEY_TYPE_STRING, hash_bytes(content)));
        }

        EntryKind::List => {
            let mut cur = node.clone();
            let tag = cur.read_tag_byte()?;
            let header = cur.read_list_header(tag)?;
            if header.count == 0 {
                return Ok(());
            }

            let (head_start, _) = cur.child_bounds(&header, 0)?;
            let head_hash = hash::element_content_hash(&cur.at(head_start))?;
            let symbol_head = cur.at(head_start).peek_byte()? & TAG_MASK == TAG_SYMBOL;
            let is_pair = header.count == 2 && symbol_head;

            match mode {
                Extraction::Value | Extraction::StructuralQuery => {
                    if is_pair {
                        let (second_start, _) = cur.child_bounds(&header, 1)?;
                        let second_hash = hash::element_content_hash(&cur.at(second_start))?;
                        let pair_hash = combine(combine(KEY_TYPE_PAIR, head_hash), second_hash);
                        add_key(keys, seen, make_key(KEY_TYPE_PAIR, pair_hash));
                    } else {
                        add_key(keys, seen, make_key(KEY_TYPE_LIST_HEAD, head_hash));
                    }
                }
                Extraction::KeyBasedQuery => {
                    // No pair keys: the stored list may be wider than the
                    // query pair, in which case it carries no pair key.
                    // Likewise no list-head key for 1- or 2-element
                    // symbol-headed probes: the stored match could itself
                    // be a pair, which stores only its pair key.
                    if !(symbol_head && header.count <= 2) {
                        add_key(keys, seen, make_key(KEY_TYPE_LIST_HEAD, head_hash));
                    }
                }
            }

            for i in 0..header.count {
                ctx.check()?;
                if keys.len() >= MAX_KEYS {
                    break;
                }
                let (start, _) = cur.child_bounds(&header, i)?;
                extract(ctx, &cur.at(start), keys, seen, mode)?;
            }
        }
    }
    Ok(())
}
