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

//! Zero-copy reader over a binary s-expression
//!
//! [`SexpReader`] decodes the header (version byte + symbol table) once and
//! hands out [`Cursor`]s positioned inside the element region. All bounds
//! are checked here; a failed check is a data-corruption error, never a
//! panic or a silent wrong answer.
//!
//! Symbol tables of at most [`SMALL_SYMTAB_SIZE`] entries live inline in
//! the reader (no heap traffic on the hot paths that open a reader per
//! operation); larger tables spill to the heap. Each entry caches the
//! symbol's hash so comparisons can reject on hash before touching bytes.

use smallvec::SmallVec;

use crate::codec::hash::hash_bytes;
use crate::codec::varint;
use crate::core::types::{
    DATA_MASK, FORMAT_VERSION, TAG_FLOAT, TAG_INTEGER, TAG_LIST, TAG_LONG_STRING, TAG_MASK,
    TAG_NIL, TAG_SHORT_STRING, TAG_SMALLINT, TAG_SYMBOL,
};
use crate::core::{Error, Result, SEntry, SMALL_SYMTAB_SIZE};

/// One decoded symbol-table entry
#[derive(Debug, Clone, Copy)]
pub struct SymbolEntry<'a> {
    /// The symbol's text bytes
    pub text: &'a [u8],
    /// Stable hash of the text, precomputed at decode time
    pub hash: u32,
}

/// Decoded view of a value's local symbol table
#[derive(Debug, Clone)]
pub struct SymbolTable<'a> {
    entries: SmallVec<[SymbolEntry<'a>; SMALL_SYMTAB_SIZE]>,
}

impl<'a> SymbolTable<'a> {
    fn parse(data: &'a [u8], pos: &mut usize) -> Result<SymbolTable<'a>> {
        let count = varint::read_varint(data, pos)?;
        if count > crate::core::MAX_SYMBOLS as u64 {
            return Err(Error::TooManySymbols {
                max: crate::core::MAX_SYMBOLS,
            });
        }
        let mut entries = SmallVec::with_capacity(count as usize);
        for _ in 0..count {
            let len = varint::read_varint(data, pos)? as usize;
            let end = pos
                .checked_add(len)
                .filter(|&e| e <= data.len())
                .ok_or(Error::Truncated("symbol table"))?;
            let text = &data[*pos..end];
            *pos = end;
            entries.push(SymbolEntry {
                text,
                hash: hash_bytes(text),
            });
        }
        Ok(SymbolTable { entries })
    }

    /// Number of symbols in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a symbol reference; out-of-range indices are corruption
    #[inline]
    pub fn get(&self, index: u64) -> Result<SymbolEntry<'a>> {
        self.entries
            .get(index as usize)
            .copied()
            .ok_or(Error::SymbolOutOfRange {
                index,
                count: self.entries.len(),
            })
    }
}

/// Owner of a value's decoded header; source of [`Cursor`]s
#[derive(Debug)]
pub struct SexpReader<'a> {
    bytes: &'a [u8],
    symbols: SymbolTable<'a>,
    root: usize,
}

impl<'a> SexpReader<'a> {
    /// Decode the header of a stored value
    ///
    /// Rejects unknown-higher format versions and truncated headers.
    pub fn new(bytes: &'a [u8]) -> Result<SexpReader<'a>> {
        let version = *bytes.first().ok_or(Error::Truncated("value header"))?;
        if version > FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: version,
                max: FORMAT_VERSION,
            });
        }
        let mut pos = 1;
        let symbols = SymbolTable::parse(bytes, &mut pos)?;
        if pos >= bytes.len() {
            return Err(Error::Truncated("root element"));
        }
        Ok(SexpReader {
            bytes,
            symbols,
            root: pos,
        })
    }

    /// The decoded symbol table
    pub fn symbols(&self) -> &SymbolTable<'a> {
        &self.symbols
    }

    /// Byte offset of the root element
    pub fn root_offset(&self) -> usize {
        self.root
    }

    /// Header bytes (version + symbol table), reused verbatim when
    /// extracting children as standalone values
    pub fn header_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.root]
    }

    /// Cursor positioned at the root element
    ///
    /// The cursor borrows the reader; `SymbolTable` is covariant in its
    /// lifetime, so the reader-long borrow is enough.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor_at(self.root)
    }

    /// Cursor positioned at an arbitrary element offset
    pub fn cursor_at(&self, pos: usize) -> Cursor<'a> {
        Cursor {
            data: self.bytes,
            pos,
            syms: self.symbols.clone(),
        }
    }
}

/// Decoded list header, uniform over both list formats
#[derive(Debug, Clone, Copy)]
pub struct ListHeader<'a> {
    /// Number of children
    pub count: usize,
    /// Stored structural hash (0 for small lists, which recompute on demand)
    pub hash: u32,
    /// Raw entry-table bytes for large lists
    entries: Option<&'a [u8]>,
    /// Offset of the element-data region
    pub data_start: usize,
    /// Exclusive end of this list's element data, when known (small lists)
    pub data_end: Option<usize>,
}

impl<'a> ListHeader<'a> {
    /// True for the entry-table format
    pub fn is_large(&self) -> bool {
        self.entries.is_some()
    }

    /// Entry for child `i` (large lists only)
    #[inline]
    pub fn entry(&self, i: usize) -> Option<SEntry> {
        let table = self.entries?;
        let raw = table.get(i * 4..i * 4 + 4)?;
        Some(SEntry::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

/// Position within a value's element region, with typed reads
///
/// Cheap to clone; recursive operations fork cursors freely.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// The owning value's symbol table
    pub syms: SymbolTable<'a>,
}

impl<'a> Cursor<'a> {
    /// Current byte offset
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Exclusive end of the underlying value
    pub fn end(&self) -> usize {
        self.data.len()
    }

    /// Fork a cursor at another offset, sharing the symbol table
    pub fn at(&self, pos: usize) -> Cursor<'a> {
        Cursor {
            pos,
            data: self.data,
            syms: self.syms.clone(),
        }
    }

    /// Bytes from the current position to the end of the value
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Slice of the underlying value
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a [u8]> {
        self.data
            .get(start..end)
            .ok_or(Error::Truncated("element slice"))
    }

    /// Peek the current element's first byte without advancing
    #[inline]
    pub fn peek_byte(&self) -> Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(Error::Truncated("element tag"))
    }

    /// Read the current element's tag byte and advance past it
    #[inline]
    pub fn read_tag_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read a varint at the current position
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64> {
        varint::read_varint(self.data, &mut self.pos)
    }

    /// Read a zig-zag varint at the current position
    #[inline]
    pub fn read_signed_varint(&mut self) -> Result<i64> {
        varint::read_signed_varint(self.data, &mut self.pos)
    }

    /// Read a little-endian u32
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let raw = self
            .data
            .get(self.pos..self.pos + 4)
            .ok_or(Error::Truncated("u32 field"))?;
        self.pos += 4;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Read an 8-byte float
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        let raw = self
            .data
            .get(self.pos..self.pos + 8)
            .ok_or(Error::Truncated("float"))?;
        self.pos += 8;
        let mut bits = [0u8; 8];
        bits.copy_from_slice(raw);
        Ok(f64::from_le_bytes(bits))
    }

    /// Take `len` raw bytes
    #[inline]
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&e| e <= self.data.len())
            .ok_or(Error::Truncated("string bytes"))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Skip forward `len` bytes
    #[inline]
    pub fn advance(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Decode an integer body. Accepts either integer encoding; the tag
    /// byte must already be consumed.
    #[inline]
    pub fn read_integer_body(&mut self, tag_byte: u8) -> Result<i64> {
        if tag_byte & TAG_MASK == TAG_SMALLINT {
            Ok((tag_byte & DATA_MASK) as i64 - crate::core::SMALLINT_BIAS)
        } else {
            self.read_signed_varint()
        }
    }

    /// Decode a string body. Accepts either string encoding; the tag byte
    /// must already be consumed.
    #[inline]
    pub fn read_string_body(&mut self, tag_byte: u8) -> Result<&'a [u8]> {
        let len = if tag_byte & TAG_MASK == TAG_SHORT_STRING {
            (tag_byte & DATA_MASK) as usize
        } else {
            self.read_varint()? as usize
        };
        self.take(len)
    }

    /// Decode a symbol reference into its table entry. The tag byte must
    /// already be consumed.
    #[inline]
    pub fn read_symbol_body(&mut self) -> Result<SymbolEntry<'a>> {
        let index = self.read_varint()?;
        self.syms.get(index)
    }

    /// Hint the CPU to pull the byte at `pos` into cache
    ///
    /// Used while iterating large-list entry tables to hide the latency of
    /// the offset chase. No effect on architectures without the intrinsic.
    #[inline]
    pub fn prefetch(&self, pos: usize) {
        #[cfg(target_arch = "x86_64")]
        if let Some(byte) = self.data.get(pos) {
            // Read-only prefetch with low temporal locality
            unsafe {
                std::arch::x86_64::_mm_prefetch::<{ std::arch::x86_64::_MM_HINT_T2 }>(
                    byte as *const u8 as *const i8,
                )
            };
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = pos;
    }

    /// Decode a list header. The tag byte must already be consumed.
    pub fn read_list_header(&mut self, tag_byte: u8) -> Result<ListHeader<'a>> {
        let inline_count = (tag_byte & DATA_MASK) as usize;
        if inline_count == 0 {
            // Large list: count + hash + entry table precede the data
            let count = self.read_u32()? as usize;
            let hash = self.read_u32()?;
            let table_len = count
                .checked_mul(4)
                .ok_or(Error::Truncated("entry table"))?;
            let table = self
                .data
                .get(self.pos..self.pos + table_len)
                .ok_or(Error::Truncated("entry table"))?;
            self.pos += table_len;
            Ok(ListHeader {
                count,
                hash,
                entries: Some(table),
                data_start: self.pos,
                data_end: None,
            })
        } else {
            let payload = self.read_varint()? as usize;
            let data_end = self
                .pos
                .checked_add(payload)
                .filter(|&e| e <= self.data.len())
                .ok_or(Error::Truncated("list payload"))?;
            Ok(ListHeader {
                count: inline_count,
                hash: 0,
                entries: None,
                data_start: self.pos,
                data_end: Some(data_end),
            })
        }
    }

    /// Bounds of child `i` of a list
    ///
    /// O(1) through the entry table for large lists; an O(i) scan, bounded
    /// by the small-list maximum, otherwise. The returned end is exact for
    /// entry-table neighbors and otherwise the tightest enclosing bound.
    pub fn child_bounds(&self, header: &ListHeader<'a>, i: usize) -> Result<(usize, usize)> {
        if i >= header.count {
            return Err(Error::internal("child index out of range"));
        }
        if header.is_large() {
            let entry = header.entry(i).ok_or(Error::Truncated("entry table"))?;
            let start = header.data_start + entry.offset();
            let end = match header.entry(i + 1) {
                Some(next) if i + 1 < header.count => header.data_start + next.offset(),
                _ => self.data.len(),
            };
            if start > end || end > self.data.len() {
                return Err(Error::OffsetOutOfBounds);
            }
            Ok((start, end))
        } else {
            let mut walk = self.at(header.data_start);
            for _ in 0..i {
                walk.skip_element()?;
            }
            let start = walk.pos;
            walk.skip_element()?;
            Ok((start, walk.pos))
        }
    }

    /// Advance past one whole element
    ///
    /// O(1) for atoms and size-prefixed small lists; large lists walk their
    /// children (their entry table carries offsets, not a total size).
    pub fn skip_element(&mut self) -> Result<()> {
        let byte = self.read_tag_byte()?;
        match byte & TAG_MASK {
            TAG_NIL | TAG_SMALLINT => Ok(()),
            TAG_INTEGER | TAG_SYMBOL => self.read_varint().map(|_| ()),
            TAG_FLOAT => self.advance(8),
            TAG_SHORT_STRING => self.advance((byte & DATA_MASK) as usize),
            TAG_LONG_STRING => {
                let len = self.read_varint()? as usize;
                self.advance(len)
            }
            TAG_LIST => {
                let header = self.read_list_header(byte)?;
                if let Some(end) = header.data_end {
                    self.pos = end;
                    Ok(())
                } else {
                    for _ in 0..header.count {
                        self.skip_element()?;
                    }
                    Ok(())
                }
            }
            _ => unreachable!("3-bit tag"),
        }
    }

    /// Bounds of the element at the current position, without advancing
    pub fn element_bounds(&self) -> Result<(usize, usize)> {
        let mut walk = self.clone();
        walk.skip_element()?;
        Ok((self.pos, walk.pos))
    }
}
