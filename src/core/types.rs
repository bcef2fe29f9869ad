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

//! Binary layout definitions for Lisq values
//!
//! A stored value is a single contiguous byte sequence:
//!
//! ```text
//! [version:1] [symbol_count:varint] [symbol_0 ... symbol_{n-1}] [root_element]
//! ```
//!
//! Each symbol entry is `[len:varint][bytes]`. The symbol table is local to
//! the value; symbol indices are not stable across values.
//!
//! Every element begins with a tag byte: the top 3 bits select the kind, the
//! bottom 5 bits carry inline payload (small-int value, short-string length,
//! or small-list count).
//!
//! Lists come in two formats:
//!
//! - Small list (count 1..=[`SMALL_LIST_MAX`]):
//!   `[tag|count] [payload_size:varint] [elements...]`
//!   The payload size enables skipping the whole list without descending.
//! - Large list (inline count 0):
//!   `[tag] [count:u32] [structural_hash:u32] [entries:u32 x count] [elements...]`
//!   Each entry packs the child's kind code and its byte offset within the
//!   element-data region, giving O(1) random access and O(1) type probes.
//!
//! Multi-byte integers in the large-list header are little-endian.

/// Binary format version, written as the first byte of every value.
/// Readers reject values carrying a higher version.
pub const FORMAT_VERSION: u8 = 6;

/// Kind tag in bits 7-5 of an element's first byte
pub const TAG_NIL: u8 = 0x00;
pub const TAG_SMALLINT: u8 = 0x20;
pub const TAG_INTEGER: u8 = 0x40;
pub const TAG_FLOAT: u8 = 0x60;
pub const TAG_SYMBOL: u8 = 0x80;
pub const TAG_SHORT_STRING: u8 = 0xA0;
pub const TAG_LONG_STRING: u8 = 0xC0;
pub const TAG_LIST: u8 = 0xE0;

/// Top 3 bits of the tag byte
pub const TAG_MASK: u8 = 0xE0;
/// Bottom 5 bits of the tag byte
pub const DATA_MASK: u8 = 0x1F;

/// Small integer range stored inline in the tag byte (5-bit biased)
pub const SMALLINT_MIN: i64 = -16;
pub const SMALLINT_MAX: i64 = 15;
pub const SMALLINT_BIAS: i64 = 16;

/// Longest string whose length fits in the tag byte
pub const SHORT_STRING_MAX: usize = 31;

/// Lists with up to this many children use the compact inline format.
/// Longer lists carry an entry table for O(1) random access.
pub const SMALL_LIST_MAX: usize = 4;

/// Symbol-table size at or below which cursors use inline (stack) storage
pub const SMALL_SYMTAB_SIZE: usize = 16;

/// Maximum nesting depth the parser accepts
pub const MAX_DEPTH: usize = 1000;

/// Maximum interned symbols per value
pub const MAX_SYMBOLS: usize = 65536;

/// Cap on keys emitted per value by the index extractor
pub const MAX_KEYS: usize = 2048;

/// Number of bit positions each element sets in a Bloom signature
pub const BLOOM_K: u32 = 4;

/// The semantic kind of a value
///
/// Small integers and integers are the same kind; short and long strings are
/// the same kind. The encoding distinguishes them for size only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SexpKind {
    /// The empty list
    Nil,
    /// An interned identifier
    Symbol,
    /// An arbitrary byte string
    String,
    /// A 64-bit signed integer
    Integer,
    /// An IEEE-754 binary64
    Float,
    /// An ordered sequence of one or more values
    List,
}

impl SexpKind {
    /// Decode the kind from an element's first byte
    pub fn from_tag_byte(byte: u8) -> SexpKind {
        match byte & TAG_MASK {
            TAG_NIL => SexpKind::Nil,
            TAG_SMALLINT | TAG_INTEGER => SexpKind::Integer,
            TAG_FLOAT => SexpKind::Float,
            TAG_SYMBOL => SexpKind::Symbol,
            TAG_SHORT_STRING | TAG_LONG_STRING => SexpKind::String,
            _ => SexpKind::List,
        }
    }

    /// Name used by the `type_of` operation
    pub fn as_str(&self) -> &'static str {
        match self {
            SexpKind::Nil => "nil",
            SexpKind::Symbol => "symbol",
            SexpKind::String => "string",
            SexpKind::Integer => "integer",
            SexpKind::Float => "float",
            SexpKind::List => "list",
        }
    }

    /// True for every kind except List
    pub fn is_atom(&self) -> bool {
        !matches!(self, SexpKind::List)
    }
}

impl std::fmt::Display for SexpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 3-bit kind code stored in a list entry
///
/// Coarser than the tag byte: both integer encodings share one code, as do
/// both string encodings, so a type probe never has to chase the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EntryKind {
    Nil = 0,
    Integer = 1,
    Float = 2,
    Symbol = 3,
    String = 4,
    List = 5,
}

impl EntryKind {
    /// Derive the entry kind from an element's first byte
    pub fn from_tag_byte(byte: u8) -> EntryKind {
        match byte & TAG_MASK {
            TAG_NIL => EntryKind::Nil,
            TAG_SMALLINT | TAG_INTEGER => EntryKind::Integer,
            TAG_FLOAT => EntryKind::Float,
            TAG_SYMBOL => EntryKind::Symbol,
            TAG_SHORT_STRING | TAG_LONG_STRING => EntryKind::String,
            _ => EntryKind::List,
        }
    }

    /// Entry kind corresponding to a semantic kind
    pub fn from_kind(kind: SexpKind) -> EntryKind {
        match kind {
            SexpKind::Nil => EntryKind::Nil,
            SexpKind::Integer => EntryKind::Integer,
            SexpKind::Float => EntryKind::Float,
            SexpKind::Symbol => EntryKind::Symbol,
            SexpKind::String => EntryKind::String,
            SexpKind::List => EntryKind::List,
        }
    }
}

/// Packed list entry: 3-bit kind code in the top bits, 28-bit offset into
/// the element-data region in the bottom bits (bit 28 reserved).
///
/// Reading one entry yields both the child's type and its location, so type
/// filtering during containment never dereferences non-candidate children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SEntry(pub u32);

impl SEntry {
    const KIND_SHIFT: u32 = 29;
    /// Bottom 28 bits; bounds element data to 256 MiB per list
    pub const OFFSET_MASK: u32 = 0x0FFF_FFFF;

    /// Pack a kind code and offset into one entry
    pub fn new(kind: EntryKind, offset: u32) -> SEntry {
        SEntry(((kind as u32) << Self::KIND_SHIFT) | (offset & Self::OFFSET_MASK))
    }

    /// The child's kind code
    pub fn kind(self) -> EntryKind {
        match self.0 >> Self::KIND_SHIFT {
            0 => EntryKind::Nil,
            1 => EntryKind::Integer,
            2 => EntryKind::Float,
            3 => EntryKind::Symbol,
            4 => EntryKind::String,
            _ => EntryKind::List,
        }
    }

    /// Byte offset of the child within the element-data region
    pub fn offset(self) -> usize {
        (self.0 & Self::OFFSET_MASK) as usize
    }

    /// Raw little-endian bytes as stored in the entry table
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode an entry from its stored bytes
    pub fn from_le_bytes(bytes: [u8; 4]) -> SEntry {
        SEntry(u32::from_le_bytes(bytes))
    }
}
