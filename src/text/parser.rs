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

//! S-expression parser: text to binary
//!
//! Grammar:
//!
//! ```text
//! sexp    ::= WS? value WS?
//! value   ::= atom | list
//! list    ::= '(' WS? (value WS?)* ')'
//! atom    ::= number | string | symbol | 'nil'
//! number  ::= [+-]? digits ('.' digits)? ([eE] [+-]? digits)?
//! string  ::= '"' (escape | [^"\])* '"'
//! escape  ::= '\' ('n' | 't' | 'r' | '\' | '"' | any)
//! symbol  ::= run of non-delimiter chars that is not a number
//! WS      ::= whitespace and ';' line comments
//! ```
//!
//! `()` and the symbol `nil` both produce NIL. Anything after the root
//! expression is an error.
//!
//! The parser interns symbols as it goes, using an open-addressed hash
//! table for O(1) probing (doubled past load factor 0.5) over an
//! append-only symbol list, and tracks each element's semantic hash so
//! large lists can store their structural hash without a second pass.

use crate::binary::builder;
use crate::binary::Sexp;
use crate::codec::hash::hash_bytes;
use crate::core::types::FORMAT_VERSION;
use crate::core::{EntryKind, Error, Result, SEntry, MAX_DEPTH, MAX_SYMBOLS};
use crate::ops::hash as semantic;

/// Parse one s-expression from text
pub fn parse(input: &str) -> Result<Sexp> {
    let mut parser = Parser::new(input.as_bytes());
    let mut element = Vec::new();

    parser.skip_whitespace();
    if parser.at_end() {
        // Empty input is the empty list
        builder::emit_nil(&mut element);
    } else {
        parser.parse_value(&mut element)?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(Error::TrailingGarbage);
        }
    }

    let mut out = Vec::with_capacity(parser.interner.encoded_len() + element.len() + 2);
    builder::write_header(
        &mut out,
        FORMAT_VERSION,
        parser.interner.symbols.iter().map(|s| s.as_slice()),
    );
    out.extend_from_slice(&element);
    Ok(Sexp::from_encoded(out))
}

/// Empty slot marker in the interner's probe table
const SLOT_EMPTY: i32 = -1;
const INITIAL_TABLE_SIZE: usize = 64;

/// Per-parse symbol interner
///
/// `table` maps probe slots to indices into `symbols`; collisions resolve
/// by linear probing. Grown (and rehashed) when more than half full.
struct SymbolInterner {
    symbols: Vec<Vec<u8>>,
    hashes: Vec<u32>,
    table: Vec<i32>,
    mask: usize,
}

impl SymbolInterner {
    fn new() -> SymbolInterner {
        SymbolInterner {
            symbols: Vec::new(),
            hashes: Vec::new(),
            table: vec![SLOT_EMPTY; INITIAL_TABLE_SIZE],
            mask: INITIAL_TABLE_SIZE - 1,
        }
    }

    /// Deduplicate a symbol, returning its table index
    fn intern(&mut self, text: &[u8]) -> Result<usize> {
        let hash = hash_bytes(text);
        let mut slot = (hash as usize) & self.mask;
        loop {
            let idx = self.table[slot];
            if idx == SLOT_EMPTY {
                break;
            }
            let idx = idx as usize;
            if self.hashes[idx] == hash && self.symbols[idx] == text {
                return Ok(idx);
            }
            slot = (slot + 1) & self.mask;
        }

        if self.symbols.len() >= MAX_SYMBOLS {
            return Err(Error::TooManySymbols { max: MAX_SYMBOLS });
        }

        if (self.symbols.len() + 1) * 2 >= self.table.len() {
            self.grow();
            slot = (hash as usize) & self.mask;
            while self.table[slot] != SLOT_EMPTY {
                slot = (slot + 1) & self.mask;
            }
        }

        let idx = self.symbols.len();
        self.symbols.push(text.to_vec());
        self.hashes.push(hash);
        self.table[slot] = idx as i32;
        Ok(idx)
    }

    fn grow(&mut self) {
        let new_size = self.table.len() * 2;
        let new_mask = new_size - 1;
        let mut new_table = vec![SLOT_EMPTY; new_size];
        for (idx, &hash) in self.hashes.iter().enumerate() {
            let mut slot = (hash as usize) & new_mask;
            while new_table[slot] != SLOT_EMPTY {
                slot = (slot + 1) & new_mask;
            }
            new_table[slot] = idx as i32;
        }
        self.table = new_table;
        self.mask = new_mask;
    }

    /// Encoded size of the symbol table (for output preallocation)
    fn encoded_len(&self) -> usize {
        self.symbols.iter().map(|s| s.len() + 2).sum::<usize>() + 2
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    interner: SymbolInterner,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Parser<'a> {
        Parser {
            input,
            pos: 0,
            depth: 0,
            interner: SymbolInterner::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else if c == b';' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Parse one value into `out`, returning its semantic hash
    fn parse_value(&mut self, out: &mut Vec<u8>) -> Result<u32> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(Error::UnexpectedEof),
            Some(b'(') => self.parse_list(out),
            Some(b'"') => self.parse_string(out),
            Some(_) => self.parse_number_or_symbol(out),
        }
    }

    fn parse_list(&mut self, out: &mut Vec<u8>) -> Result<u32> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthExceeded { max: MAX_DEPTH });
        }
        self.depth += 1;
        self.pos += 1; // opening paren

        self.skip_whitespace();
        if self.peek() == Some(b')') {
            self.pos += 1;
            self.depth -= 1;
            builder::emit_nil(out);
            return Ok(semantic::nil_hash());
        }

        let mut elements = Vec::new();
        let mut entries: Vec<SEntry> = Vec::new();
        let mut child_hashes: Vec<u32> = Vec::new();

        loop {
            match self.peek() {
                None => return Err(Error::UnterminatedList),
                Some(b')') => break,
                Some(_) => {}
            }
            let offset = elements.len();
            if offset > SEntry::OFFSET_MASK as usize {
                return Err(Error::ListTooLarge);
            }
            let child_hash = self.parse_value(&mut elements)?;
            let kind = EntryKind::from_tag_byte(elements[offset]);
            entries.push(SEntry::new(kind, offset as u32));
            child_hashes.push(child_hash);
            self.skip_whitespace();
        }
        self.pos += 1; // closing paren
        self.depth -= 1;

        let hash = builder::list_hash(&child_hashes);
        builder::emit_list(out, &elements, &entries, hash)?;
        Ok(hash)
    }

    fn parse_string(&mut self, out: &mut Vec<u8>) -> Result<u32> {
        self.pos += 1; // opening quote
        let mut content: Vec<u8> = Vec::new();

        loop {
            let c = match self.peek() {
                None => return Err(Error::UnterminatedString),
                Some(c) => c,
            };
            self.pos += 1;
            match c {
                b'"' => break,
                b'\\' => {
                    let escaped = self.peek().ok_or(Error::UnterminatedEscape)?;
                    self.pos += 1;
                    content.push(match escaped {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        other => other,
                    });
                }
                other => content.push(other),
            }
        }

        builder::emit_string(out, &content);
        Ok(semantic::string_hash(&content))
    }

    fn parse_number_or_symbol(&mut self, out: &mut Vec<u8>) -> Result<u32> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || matches!(c, b'(' | b')' | b'"' | b';') {
                break;
            }
            self.pos += 1;
        }
        let token = &self.input[start..self.pos];
        if token.is_empty() {
            return Err(Error::EmptyAtom);
        }

        if token == b"nil" {
            builder::emit_nil(out);
            return Ok(semantic::nil_hash());
        }

        match classify_number(token) {
            Some(NumberClass::Integer) => {
                // Tokens wider than i64 fall back to the float reading
                let text = std::str::from_utf8(token).map_err(|_| Error::EmptyAtom)?;
                match text.parse::<i64>() {
                    Ok(value) => {
                        builder::emit_integer(out, value);
                        Ok(semantic::integer_hash(value))
                    }
                    Err(_) => {
                        let value: f64 = text.parse().map_err(|_| Error::EmptyAtom)?;
                        builder::emit_float(out, value);
                        Ok(semantic::float_hash(value))
                    }
                }
            }
            Some(NumberClass::Float) => {
                let text = std::str::from_utf8(token).map_err(|_| Error::EmptyAtom)?;
                let value: f64 = text.parse().map_err(|_| Error::EmptyAtom)?;
                builder::emit_float(out, value);
                Ok(semantic::float_hash(value))
            }
            None => {
                let idx = self.interner.intern(token)?;
                builder::emit_symbol_ref(out, idx);
                Ok(semantic::symbol_hash(token))
            }
        }
    }
}

enum NumberClass {
    Integer,
    Float,
}

/// Classify a token against the number grammar
///
/// `[+-]? digits ('.' digits)? ([eE] [+-]? digits)?` - a dot or exponent
/// makes it a float; anything that falls outside the grammar is a symbol.
fn classify_number(token: &[u8]) -> Option<NumberClass> {
    let mut i = 0;
    if matches!(token.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }

    let int_digits = count_digits(&token[i..]);
    if int_digits == 0 {
        return None;
    }
    i += int_digits;

    let mut is_float = false;
    if token.get(i) == Some(&b'.') {
        i += 1;
        let frac_digits = count_digits(&token[i..]);
        if frac_digits == 0 {
            return None;
        }
        i += frac_digits;
        is_float = true;
    }

    if matches!(token.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(token.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&token[i..]);
        if exp_digits == 0 {
            return None;
        }
        i += exp_digits;
        is_float = true;
    }

    if i != token.len() {
        return None;
    }
    Some(if is_float {
        NumberClass::Float
    } else {
        NumberClass::Integer
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
