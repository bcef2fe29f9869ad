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

//! Semantic hashing of elements and whole values
//!
//! The semantic hash mirrors equality exactly:
//!
//! - two semantically equal values hash equal, whatever their encodings
//! - symbols hash by text, never by table index
//! - small integers and integers hash as the same canonical i64
//! - short and long strings hash the same content the same way
//! - `-0.0` hashes as `+0.0`
//! - lists combine child hashes with position mixing, and large lists
//!   reuse the hash stored in their header instead of recomputing
//!
//! The writer-side formulas live here too so the parser produces hashes
//! identical to what a reader would recompute.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::codec::bloom::BloomSig;
use crate::codec::hash::{
    combine, combine_child, extend_hash, hash_tagged_bytes, hash_u32, hash_f64, hash_i64,
    list_hash_seed,
};
use crate::core::types::{
    TAG_INTEGER, TAG_LIST, TAG_MASK, TAG_NIL, TAG_SHORT_STRING, TAG_SMALLINT, TAG_SYMBOL,
};
use crate::core::Result;

/// Hash of NIL
#[inline]
pub fn nil_hash() -> u32 {
    0
}

/// Hash of an integer, canonical across both encodings
#[inline]
pub fn integer_hash(value: i64) -> u32 {
    combine(hash_u32(TAG_INTEGER as u32), hash_i64(value))
}

/// Hash of a float; -0.0 normalized
#[inline]
pub fn float_hash(value: f64) -> u32 {
    combine(hash_u32(crate::core::types::TAG_FLOAT as u32), hash_f64(value))
}

/// Hash of a symbol's text
#[inline]
pub fn symbol_hash(text: &[u8]) -> u32 {
    hash_tagged_bytes(TAG_SYMBOL, text)
}

/// Hash of a string's content, identical for both encodings
#[inline]
pub fn string_hash(content: &[u8]) -> u32 {
    hash_tagged_bytes(TAG_SHORT_STRING, content)
}

/// Semantic hash of the element at the cursor position
///
/// Does not advance the caller's cursor. Large lists return their stored
/// structural hash; small lists and atoms compute on demand.
pub fn element_hash(cursor: &Cursor<'_>) -> Result<u32> {
    let mut cur = cursor.clone();
    let byte = cur.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => Ok(nil_hash()),

        TAG_SMALLINT | TAG_INTEGER => {
            let value = cur.read_integer_body(byte)?;
            Ok(integer_hash(value))
        }

        crate::core::types::TAG_FLOAT => Ok(float_hash(cur.read_f64()?)),

        TAG_SYMBOL => {
            let entry = cur.read_symbol_body()?;
            Ok(combine(hash_u32(TAG_SYMBOL as u32), entry.hash))
        }

        TAG_SHORT_STRING | crate::core::types::TAG_LONG_STRING => {
            let content = cur.read_string_body(byte)?;
            Ok(string_hash(content))
        }

        _ => {
            let header = cur.read_list_header(byte)?;
            if header.is_large() {
                return Ok(header.hash);
            }
            let mut acc = list_hash_seed(header.count as u32, TAG_LIST);
            for i in 0..header.count {
                let child = element_hash(&cur)?;
                cur.skip_element()?;
                acc = combine_child(acc, child, i);
            }
            Ok(acc)
        }
    }
}

/// Bloom signature of the element at the cursor position
///
/// Atoms contribute their element hash; lists union all descendants'
/// signatures plus their own count/kind signature, so one subset test
/// covers the whole subtree.
pub fn element_bloom(cursor: &Cursor<'_>) -> Result<BloomSig> {
    let mut cur = cursor.clone();
    let byte = cur.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => Ok(BloomSig::from_hash(hash_u32(TAG_NIL as u32))),

        TAG_SMALLINT | TAG_INTEGER => {
            let value = cur.read_integer_body(byte)?;
            Ok(BloomSig::from_hash(integer_hash(value)))
        }

        crate::core::types::TAG_FLOAT => Ok(BloomSig::from_hash(float_hash(cur.read_f64()?))),

        TAG_SYMBOL => {
            let entry = cur.read_symbol_body()?;
            Ok(BloomSig::from_hash(combine(
                hash_u32(TAG_SYMBOL as u32),
                entry.hash,
            )))
        }

        TAG_SHORT_STRING | crate::core::types::TAG_LONG_STRING => {
            let content = cur.read_string_body(byte)?;
            Ok(BloomSig::from_hash(string_hash(content)))
        }

        _ => {
            let header = cur.read_list_header(byte)?;
            let mut sig = BloomSig::EMPTY;
            if header.is_large() {
                for i in 0..header.count {
                    let (start, _) = cur.child_bounds(&header, i)?;
                    sig = sig.union(element_bloom(&cur.at(start))?);
                }
            } else {
                for _ in 0..header.count {
                    sig = sig.union(element_bloom(&cur)?);
                    cur.skip_element()?;
                }
            }
            let own = list_hash_seed(header.count as u32, TAG_LIST);
            Ok(sig.union(BloomSig::from_hash(own)))
        }
    }
}

/// Bloom signature over atom content only, skipping each list's own
/// count/kind signature
///
/// Key-based containment matches a needle list against container lists of
/// any equal-or-larger arity, so a needle signature keyed on list counts
/// would reject true matches. Atom signatures alone stay sound: every
/// needle atom must appear equal somewhere in the container.
pub fn element_atom_bloom(cursor: &Cursor<'_>) -> Result<BloomSig> {
    let mut cur = cursor.clone();
    let byte = cur.read_tag_byte()?;
    if byte & TAG_MASK != TAG_LIST {
        return element_bloom(cursor);
    }
    let header = cur.read_list_header(byte)?;
    let mut sig = BloomSig::EMPTY;
    if header.is_large() {
        for i in 0..header.count {
            let (start, _) = cur.child_bounds(&header, i)?;
            sig = sig.union(element_atom_bloom(&cur.at(start))?);
        }
    } else {
        for _ in 0..header.count {
            sig = sig.union(element_atom_bloom(&cur)?);
            cur.skip_element()?;
        }
    }
    Ok(sig)
}

/// Semantic hash of a whole value
pub fn value_hash(sexp: &Sexp) -> Result<u32> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    element_hash(&reader.cursor())
}

/// Seeded 64-bit variant of the value hash
pub fn value_hash_extended(sexp: &Sexp, seed: i64) -> Result<i64> {
    Ok(extend_hash(value_hash(sexp)?, seed))
}

/// Bloom signature of a whole value
pub fn value_bloom(sexp: &Sexp) -> Result<BloomSig> {
    let reader = SexpReader::new(sexp.as_bytes())?;
    element_bloom(&reader.cursor())
}

/// Untagged content hash used by the inverted-index key extractor
///
/// Unlike [`element_hash`], kinds are not mixed in (the key's type marker
/// carries that) and a list hashes as its first child, which is what the
/// list-head and pair keys want.
pub fn element_content_hash(cursor: &Cursor<'_>) -> Result<u32> {
    let mut cur = cursor.clone();
    let byte = cur.read_tag_byte()?;
    match byte & TAG_MASK {
        TAG_NIL => Ok(hash_u32(0)),

        TAG_SMALLINT | TAG_INTEGER => {
            let value = cur.read_integer_body(byte)?;
            Ok(hash_i64(value))
        }

        crate::core::types::TAG_FLOAT => Ok(hash_f64(cur.read_f64()?)),

        TAG_SYMBOL => Ok(cur.read_symbol_body()?.hash),

        TAG_SHORT_STRING | crate::core::types::TAG_LONG_STRING => {
            let content = cur.read_string_body(byte)?;
            Ok(crate::codec::hash::hash_bytes(content))
        }

        _ => {
            let header = cur.read_list_header(byte)?;
            if header.count == 0 {
                return Ok(hash_u32(0));
            }
            let (start, _) = cur.child_bounds(&header, 0)?;
            element_content_hash(&cur.at(start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(text: &str) -> u32 {
        value_hash(&Sexp::parse(text).unwrap()).unwrap()
    }

    #[test]
    fn test_hash_matches_across_int_encodings() {
        // -16..=15 use the inline encoding; the hash must not care
        assert_eq!(hash_of("15"), integer_hash(15));
        assert_eq!(hash_of("16"), integer_hash(16));
        assert_eq!(hash_of("-16"), integer_hash(-16));
        assert_eq!(hash_of("-17"), integer_hash(-17));
    }

    #[test]
    fn test_hash_matches_across_string_encodings() {
        let short = "x".repeat(31);
        let long = "x".repeat(32);
        assert_eq!(
            hash_of(&format!("\"{short}\"")),
            string_hash(short.as_bytes())
        );
        assert_eq!(hash_of(&format!("\"{long}\"")), string_hash(long.as_bytes()));
    }

    #[test]
    fn test_stored_list_hash_matches_computed() {
        // Same children, small vs large list format
        let small = Sexp::parse("(a b c d)").unwrap();
        let large = Sexp::parse("(a b c d e)").unwrap();
        let small_cdr_hash = value_hash(&small).unwrap();
        // Recompute the large list's hash by hand from its children
        let children: Vec<u32> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| symbol_hash(s.as_bytes()))
            .collect();
        assert_eq!(
            value_hash(&large).unwrap(),
            crate::binary::builder::list_hash(&children)
        );
        assert_ne!(small_cdr_hash, value_hash(&large).unwrap());
    }

    #[test]
    fn test_symbol_hash_ignores_table_index() {
        // `c` is symbol 2 in one value and symbol 0 in the other
        let wide = Sexp::parse("(a b c)").unwrap();
        let narrow = Sexp::parse("c").unwrap();
        let extracted = wide.nth(2).unwrap().unwrap();
        assert_eq!(
            value_hash(&extracted).unwrap(),
            value_hash(&narrow).unwrap()
        );
    }

    #[test]
    fn test_negative_zero_float() {
        assert_eq!(hash_of("-0.0"), hash_of("0.0"));
    }

    #[test]
    fn test_nil_hash_is_zero() {
        assert_eq!(hash_of("()"), 0);
        assert_eq!(hash_of("nil"), 0);
    }

    #[test]
    fn test_extended_hash_seed_zero_widens_base() {
        let sexp = Sexp::parse("(a 1)").unwrap();
        let base = value_hash(&sexp).unwrap();
        assert_eq!(
            value_hash_extended(&sexp, 0).unwrap(),
            base as i64
        );
        assert_ne!(
            value_hash_extended(&sexp, 1).unwrap(),
            value_hash_extended(&sexp, 2).unwrap()
        );
    }

    #[test]
    fn test_bloom_covers_descendants() {
        let container = Sexp::parse("(top (mid (deep 42)))").unwrap();
        let container_sig = value_bloom(&container).unwrap();
        for needle in ["top", "mid", "deep", "42", "(deep 42)"] {
            let needle_sig = value_bloom(&Sexp::parse(needle).unwrap()).unwrap();
            assert!(
                container_sig.may_contain(needle_sig),
                "bloom must cover {needle}"
            );
        }
    }
}
