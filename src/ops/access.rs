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

//! List access operations: car, cdr, nth, length
//!
//! Child extraction never rebuilds symbol tables: the parent's header
//! (version byte + symbol table) is copied verbatim and the child's bytes
//! appended, so the child's symbol references stay valid against the
//! inherited table. This is what makes `car`/`nth` cheap.

use crate::binary::builder;
use crate::binary::{Sexp, SexpReader};
use crate::core::types::{TAG_LIST, TAG_MASK, TAG_NIL};
use crate::core::{EntryKind, Error, Result, SEntry};
use crate::ops::hash;

/// Number of elements: 0 for NIL, 1 for non-list atoms, count for lists
///
/// O(1): list counts live in the header. Callers distinguish atoms from
/// one-element lists via `is_list`.
pub fn length(sexp: &Sexp) -> Result<i32> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    let mut cursor = reader.cursor();
    let byte = cursor.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => Ok(0),
        TAG_LIST => {
            let header = cursor.read_list_header(byte)?;
            Ok(header.count as i32)
        }
        _ => Ok(1),
    }
}

/// First element of a list
///
/// NIL yields `None`; atoms are an error; otherwise the child is extracted
/// as a standalone value.
pub fn car(sexp: &Sexp) -> Result<Option<Sexp>> {
    extract_child(sexp, 0, "car")
}

/// Element `n`, 0-indexed
///
/// Out-of-range yields `None`. A non-list atom answers itself for `n = 0`,
/// consistent with atoms having length 1.
pub fn nth(sexp: &Sexp, n: i32) -> Result<Option<Sexp>> {
    if n < 0 {
        return Ok(None);
    }
    let reader = SexpReader::new(sexp.as_bytes())?;
    let mut cursor = reader.cursor();
    let byte = cursor.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => Ok(None),
        TAG_LIST => {
            let header = cursor.read_list_header(byte)?;
            if n as usize >= header.count {
                return Ok(None);
            }
            let (start, _) = cursor.child_bounds(&header, n as usize)?;
            let (exact_start, exact_end) = cursor.at(start).element_bounds()?;
            let element = cursor.slice(exact_start, exact_end)?;
            Ok(Some(Sexp::from_header_and_element(
                reader.header_bytes(),
                element,
            )))
        }
        _ => {
            if n == 0 {
                Ok(Some(sexp.clone()))
            } else {
                Ok(None)
            }
        }
    }
}

/// All elements but the first, as a new list (or NIL for 1-element lists)
///
/// The result keeps the parent's symbol table verbatim and re-derives the
/// surviving children's entry table and structural hash, so large results
/// satisfy the stored-hash invariant.
pub fn cdr(sexp: &Sexp) -> Result<Option<Sexp>> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    let mut cursor = reader.cursor();
    let byte = cursor.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => return Ok(None),
        TAG_LIST => {}
        _ => return Err(Error::NotAList { op: "cdr" }),
    }

    let header = cursor.read_list_header(byte)?;
    if header.count <= 1 {
        return Ok(Some(Sexp::nil()));
    }

    let mut elements: Vec<u8> = Vec::new();
    let mut entries: Vec<SEntry> = Vec::new();
    let mut child_hashes: Vec<u32> = Vec::new();

    for i in 1..header.count {
        let (start, _) = cursor.child_bounds(&header, i)?;
        let (exact_start, exact_end) = cursor.at(start).element_bounds()?;
        let bytes = cursor.slice(exact_start, exact_end)?;

        let offset = elements.len();
        if offset > SEntry::OFFSET_MASK as usize {
            return Err(Error::ListTooLarge);
        }
        entries.push(SEntry::new(EntryKind::from_tag_byte(bytes[0]), offset as u32));
        child_hashes.push(hash::element_hash(&cursor.at(exact_start))?);
        elements.extend_from_slice(bytes);
    }

    let list_hash = builder::list_hash(&child_hashes);
    let mut out = reader.header_bytes().to_vec();
    builder::emit_list(&mut out, &elements, &entries, list_hash)?;
    Ok(Some(Sexp::from_encoded(out)))
}

fn extract_child(sexp: &Sexp, index: usize, op: &'static str) -> Result<Option<Sexp>> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    let mut cursor = reader.cursor();
    let byte = cursor.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => return Ok(None),
        TAG_LIST => {}
        _ => return Err(Error::NotAList { op }),
    }
    let header = cursor.read_list_header(byte)?;
    if index >= header.count {
        return Ok(None);
    }
    let (start, _) = cursor.child_bounds(&header, index)?;
    let (exact_start, exact_end) = cursor.at(start).element_bounds()?;
    let element = cursor.slice(exact_start, exact_end)?;
    Ok(Some(Sexp::from_header_and_element(
        reader.header_bytes(),
        element,
    )))
}
