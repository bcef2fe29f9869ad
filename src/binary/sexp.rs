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

//! The owned s-expression value
//!
//! A [`Sexp`] is a single contiguous, immutable byte sequence in the
//! versioned binary layout: version byte, local symbol table, root element.
//! Values are reference-counted; cloning is pointer-cheap and sharing
//! read-only within a request is safe because values never mutate.
//!
//! Construction paths:
//!
//! - [`Sexp::parse`] - from text, via the parser
//! - [`Sexp::from_bytes`] - from stored/wire bytes, fully validated
//! - child extraction (`car`, `nth`, `find_first`) - reuses the parent's
//!   header verbatim and appends the child's bytes; the child's symbol
//!   references stay valid because they index the inherited table. Such
//!   bytes are only meaningful under a header whose symbol table is a
//!   superset of the one they were written against.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::binary::cursor::SexpReader;
use crate::codec::varint;
use crate::codec::BloomSig;
use crate::core::types::{FORMAT_VERSION, TAG_NIL};
use crate::core::{Error, Result, SexpKind};
use crate::ops;
use crate::text;

/// An immutable s-expression value in binary form
#[derive(Clone)]
pub struct Sexp {
    bytes: Arc<[u8]>,
}

/// Process-long cached NIL value
static NIL_SINGLETON: OnceLock<Sexp> = OnceLock::new();

impl Sexp {
    /// The NIL value (empty list)
    pub fn nil() -> Sexp {
        NIL_SINGLETON
            .get_or_init(|| Sexp {
                // version, zero symbols, nil tag
                bytes: Arc::from([FORMAT_VERSION, 0, TAG_NIL].as_slice()),
            })
            .clone()
    }

    /// Parse a value from its text representation
    pub fn parse(input: &str) -> Result<Sexp> {
        text::parser::parse(input)
    }

    /// Reconstruct a value from stored bytes, validating the whole layout
    ///
    /// This is the binary receive path: the version must be supported, the
    /// symbol table in bounds, and exactly one well-formed root element
    /// must span the remaining bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Sexp> {
        let reader = SexpReader::new(bytes)?;
        let mut cursor = reader.cursor();
        cursor.skip_element()?;
        if cursor.pos() != bytes.len() {
            return Err(Error::Truncated("trailing bytes after root element"));
        }
        Ok(Sexp {
            bytes: Arc::from(bytes),
        })
    }

    /// Wrap bytes produced by this crate's own encoders
    pub(crate) fn from_encoded(bytes: Vec<u8>) -> Sexp {
        Sexp {
            bytes: Arc::from(bytes),
        }
    }

    /// Build a standalone value from a parent's header and one element
    ///
    /// The extraction fast path: no symbol-table rebuild, the parent's
    /// header bytes are copied verbatim and the element appended.
    pub(crate) fn from_header_and_element(header: &[u8], element: &[u8]) -> Sexp {
        let mut bytes = Vec::with_capacity(header.len() + element.len());
        bytes.extend_from_slice(header);
        bytes.extend_from_slice(element);
        Sexp::from_encoded(bytes)
    }

    /// The stored bytes (binary send path)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Offset of the root element: version byte plus symbol table
    fn root_offset(bytes: &[u8]) -> Result<usize> {
        let mut pos = 1;
        let count = varint::read_varint(bytes, &mut pos)?;
        for _ in 0..count {
            let len = varint::read_varint(bytes, &mut pos)? as usize;
            pos = pos
                .checked_add(len)
                .filter(|&p| p <= bytes.len())
                .ok_or(Error::Truncated("symbol table"))?;
        }
        Ok(pos)
    }

    /// The semantic kind of the root element
    pub fn kind(&self) -> SexpKind {
        // Unreachable fallback: every construction path validates the layout
        Self::root_offset(&self.bytes)
            .ok()
            .and_then(|off| self.bytes.get(off).copied())
            .map(SexpKind::from_tag_byte)
            .unwrap_or(SexpKind::Nil)
    }

    /// Kind name: one of `nil`, `symbol`, `string`, `integer`, `float`, `list`
    pub fn type_of(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_nil(&self) -> bool {
        self.kind() == SexpKind::Nil
    }

    pub fn is_list(&self) -> bool {
        self.kind() == SexpKind::List
    }

    /// True for every kind except list
    pub fn is_atom(&self) -> bool {
        self.kind().is_atom()
    }

    pub fn is_symbol(&self) -> bool {
        self.kind() == SexpKind::Symbol
    }

    pub fn is_string(&self) -> bool {
        self.kind() == SexpKind::String
    }

    /// True for integers and floats
    pub fn is_number(&self) -> bool {
        matches!(self.kind(), SexpKind::Integer | SexpKind::Float)
    }

    /// Canonical text form
    pub fn to_text(&self) -> Result<String> {
        text::printer::print(self)
    }

    /// Number of elements: 0 for NIL, 1 for atoms, child count for lists
    pub fn length(&self) -> Result<i32> {
        ops::access::length(self)
    }

    /// First element of a list; `None` for NIL
    pub fn car(&self) -> Result<Option<Sexp>> {
        ops::access::car(self)
    }

    /// All but the first element; `None` for NIL
    pub fn cdr(&self) -> Result<Option<Sexp>> {
        ops::access::cdr(self)
    }

    /// Alias for [`Sexp::car`]
    pub fn head(&self) -> Result<Option<Sexp>> {
        ops::access::car(self)
    }

    /// Element `n` (0-indexed); `None` when out of range
    pub fn nth(&self, n: i32) -> Result<Option<Sexp>> {
        ops::access::nth(self, n)
    }

    /// Semantic equality, independent of symbol tables and encodings
    pub fn equal(&self, other: &Sexp) -> Result<bool> {
        ops::eq::equal(self, other)
    }

    /// Semantic hash; equal values hash equal regardless of encoding
    pub fn semantic_hash(&self) -> Result<i32> {
        ops::hash::value_hash(self).map(|h| h as i32)
    }

    /// 64-bit seeded variant of the semantic hash
    pub fn hash_extended(&self, seed: i64) -> Result<i64> {
        ops::hash::value_hash_extended(self, seed)
    }

    /// Bloom signature over all element hashes in this value
    pub fn bloom(&self) -> Result<BloomSig> {
        ops::hash::value_bloom(self)
    }

    /// Structural containment: does a subtree of `self` equal `needle`?
    pub fn contains(&self, needle: &Sexp) -> Result<bool> {
        ops::contains::contains(&ops::OpContext::default(), self, needle)
    }

    /// Key-based containment: list heads as keys, tail order-insensitive
    pub fn contains_key(&self, needle: &Sexp) -> Result<bool> {
        ops::contains_key::contains_key(&ops::OpContext::default(), self, needle)
    }

    /// Does this value match `pattern` at the root?
    pub fn matches(&self, pattern: &Sexp) -> Result<bool> {
        ops::matcher::matches(self, pattern)
    }

    /// First subtree matching `pattern`, depth-first pre-order
    pub fn find_first(&self, pattern: &Sexp) -> Result<Option<Sexp>> {
        ops::matcher::find_first(self, pattern)
    }
}

impl PartialEq for Sexp {
    /// Semantic equality; corrupt operands compare unequal
    fn eq(&self, other: &Self) -> bool {
        ops::eq::equal(self, other).unwrap_or(false)
    }
}

impl FromStr for Sexp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Sexp> {
        Sexp::parse(s)
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => write!(f, "Sexp({text})"),
            Err(err) => write!(f, "Sexp(<corrupt: {err}>)"),
        }
    }
}
