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

//! Element and header emitters for the binary layout
//!
//! The parser and the list-rebuilding operations (`cdr`) share these
//! helpers so every writer produces the same bytes for the same value:
//! atoms pick their compact encodings here, and lists choose between the
//! inline small format and the entry-table large format.

use crate::codec::hash;
use crate::codec::varint::{write_signed_varint, write_varint};
use crate::core::types::{
    SHORT_STRING_MAX, SMALLINT_BIAS, SMALLINT_MAX, SMALLINT_MIN, TAG_FLOAT, TAG_INTEGER, TAG_LIST,
    TAG_LONG_STRING, TAG_NIL, TAG_SHORT_STRING, TAG_SMALLINT, TAG_SYMBOL,
};
use crate::core::{Error, Result, SEntry, SMALL_LIST_MAX};

/// Emit a NIL element
pub fn emit_nil(out: &mut Vec<u8>) {
    out.push(TAG_NIL);
}

/// Emit an integer, using the inline small-int form when it fits
pub fn emit_integer(out: &mut Vec<u8>, value: i64) {
    if (SMALLINT_MIN..=SMALLINT_MAX).contains(&value) {
        out.push(TAG_SMALLINT | ((value + SMALLINT_BIAS) as u8));
    } else {
        out.push(TAG_INTEGER);
        write_signed_varint(out, value);
    }
}

/// Emit a float (8 bytes, little-endian bit pattern as stored)
pub fn emit_float(out: &mut Vec<u8>, value: f64) {
    out.push(TAG_FLOAT);
    out.extend_from_slice(&value.to_le_bytes());
}

/// Emit a string, short form when the length fits the tag byte
pub fn emit_string(out: &mut Vec<u8>, content: &[u8]) {
    if content.len() <= SHORT_STRING_MAX {
        out.push(TAG_SHORT_STRING | content.len() as u8);
    } else {
        out.push(TAG_LONG_STRING);
        write_varint(out, content.len() as u64);
    }
    out.extend_from_slice(content);
}

/// Emit a symbol reference into the local symbol table
pub fn emit_symbol_ref(out: &mut Vec<u8>, index: usize) {
    out.push(TAG_SYMBOL);
    write_varint(out, index as u64);
}

/// Emit a list from already-encoded children
///
/// `elements` holds the concatenated child encodings and `entries` one
/// packed entry per child (kind + offset into `elements`). Small lists
/// drop the entry table and prepend the payload size instead; large lists
/// store the entry table and the structural hash.
pub fn emit_list(
    out: &mut Vec<u8>,
    elements: &[u8],
    entries: &[SEntry],
    structural_hash: u32,
) -> Result<()> {
    let count = entries.len();
    if elements.len() > SEntry::OFFSET_MASK as usize {
        return Err(Error::ListTooLarge);
    }
    if count == 0 {
        // A zero-element list is NIL by definition
        emit_nil(out);
        return Ok(());
    }
    if count <= SMALL_LIST_MAX {
        out.push(TAG_LIST | count as u8);
        write_varint(out, elements.len() as u64);
        out.extend_from_slice(elements);
    } else {
        out.push(TAG_LIST);
        out.extend_from_slice(&(count as u32).to_le_bytes());
        out.extend_from_slice(&structural_hash.to_le_bytes());
        for entry in entries {
            out.extend_from_slice(&entry.to_le_bytes());
        }
        out.extend_from_slice(elements);
    }
    Ok(())
}

/// Structural hash of a list from its ordered child hashes
///
/// Seeded with the count and kind, then order-sensitive child mixing.
/// This is the hash stored in large-list headers and recomputed on demand
/// for small lists, so writers and readers must agree byte-for-byte.
pub fn list_hash(child_hashes: &[u32]) -> u32 {
    let mut acc = hash::list_hash_seed(child_hashes.len() as u32, TAG_LIST);
    for (i, &child) in child_hashes.iter().enumerate() {
        acc = hash::combine_child(acc, child, i);
    }
    acc
}

/// Write a value header: version byte plus symbol table
pub fn write_header<'a>(
    out: &mut Vec<u8>,
    version: u8,
    symbols: impl ExactSizeIterator<Item = &'a [u8]>,
) {
    out.push(version);
    write_varint(out, symbols.len() as u64);
    for symbol in symbols {
        write_varint(out, symbol.len() as u64);
        out.extend_from_slice(symbol);
    }
}
