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

//! Semantic equality
//!
//! Equality cannot be bitwise: symbol tables differ between semantically
//! equal values (`car` of `(a b c)` carries three symbols, a freshly
//! parsed `a` carries one), and the same number or string may use either
//! of two encodings. Bitwise equality is only a fast path for the common
//! case of identically encoded values.
//!
//! The slow path walks both values in lockstep, comparing decoded
//! contents: symbol text rather than table indices, canonical i64 for both
//! integer encodings, numeric float comparison (so `-0.0 = 0.0`), and
//! pairwise recursion for lists.

use crate::binary::cursor::Cursor;
use crate::binary::{Sexp, SexpReader};
use crate::core::{EntryKind, Result};

/// Semantic equality of two values
pub fn equal(a: &Sexp, b: &Sexp) -> Result<bool> {
    // Identical bytes are definitely equal
    if a.as_bytes() == b.as_bytes() {
        return Ok(true);
    }

    let reader_a = SexpReader::new(a.as_bytes())?;
    let reader_b = SexpReader::new(b.as_bytes())?;
    elements_equal(&mut reader_a.cursor(), &mut reader_b.cursor())
}

/// Compare the elements at both cursors, advancing past them on success
///
/// On a mismatch the answer is final; cursor positions are unspecified and
/// callers must not keep walking with them.
pub fn elements_equal(a: &mut Cursor<'_>, b: &mut Cursor<'_>) -> Result<bool> {
    let byte_a = a.read_tag_byte()?;
    let byte_b = b.read_tag_byte()?;
    let kind_a = EntryKind::from_tag_byte(byte_a);
    let kind_b = EntryKind::from_tag_byte(byte_b);

    // The entry kind already collapses the two integer encodings and the
    // two string encodings
    if kind_a != kind_b {
        return Ok(false);
    }

    match kind_a {
        EntryKind::Nil => Ok(true),

        EntryKind::Integer => {
            let value_a = a.read_integer_body(byte_a)?;
            let value_b = b.read_integer_body(byte_b)?;
            Ok(value_a == value_b)
        }

        EntryKind::Float => {
            // Numeric comparison: -0.0 equals 0.0
            Ok(a.read_f64()? == b.read_f64()?)
        }

        EntryKind::Symbol => {
            let sym_a = a.read_symbol_body()?;
            let sym_b = b.read_symbol_body()?;
            // Hash first: precomputed, rejects almost all mismatches
            Ok(sym_a.hash == sym_b.hash && sym_a.text == sym_b.text)
        }

        EntryKind::String => {
            let content_a = a.read_string_body(byte_a)?;
            let content_b = b.read_string_body(byte_b)?;
            Ok(content_a == content_b)
        }

        EntryKind::List => {
            let header_a = a.read_list_header(byte_a)?;
            let header_b = b.read_list_header(byte_b)?;
            if header_a.count != header_b.count {
                return Ok(false);
            }
            for _ in 0..header_a.count {
                if !elements_equal(a, b)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(x: &str, y: &str) -> bool {
        equal(&Sexp::parse(x).unwrap(), &Sexp::parse(y).unwrap()).unwrap()
    }

    #[test]
    fn test_atoms() {
        assert!(eq("a", "a"));
        assert!(!eq("a", "b"));
        assert!(eq("42", "42"));
        assert!(!eq("42", "43"));
        assert!(eq("\"s\"", "\"s\""));
        assert!(!eq("\"s\"", "s"));
        assert!(!eq("1", "1.0"));
        assert!(eq("()", "nil"));
    }

    #[test]
    fn test_lists() {
        assert!(eq("(a b c)", "( a  b  c )"));
        assert!(!eq("(a b c)", "(a b)"));
        assert!(!eq("(a b c)", "(a c b)"));
        assert!(eq("((a) (b (c)))", "((a) (b (c)))"));
        assert!(!eq("((a) (b (c)))", "((a) (b (d)))"));
    }

    #[test]
    fn test_across_list_formats() {
        // Equality of a small list (4 children) and the large-format list
        // that cdr of a 5-list produces
        let five = Sexp::parse("(x a b c d)").unwrap();
        let rest = five.cdr().unwrap().unwrap();
        let fresh = Sexp::parse("(a b c d)").unwrap();
        assert!(equal(&rest, &fresh).unwrap());
    }

    #[test]
    fn test_symbol_table_independence() {
        let parent = Sexp::parse("(a b c)").unwrap();
        let child = parent.car().unwrap().unwrap();
        let fresh = Sexp::parse("a").unwrap();
        // Different binary bytes (child carries the 3-symbol table)...
        assert_ne!(child.as_bytes(), fresh.as_bytes());
        // ...but semantically equal
        assert!(equal(&child, &fresh).unwrap());
    }

    #[test]
    fn test_negative_zero() {
        assert!(eq("-0.0", "0.0"));
        assert!(eq("(x -0.0)", "(x 0.0)"));
    }

    #[test]
    fn test_mismatch_inside_long_list() {
        assert!(!eq("(1 2 3 4 5 6 7 8)", "(1 2 3 4 5 6 0 8)"));
        assert!(eq("(1 2 3 4 5 6 7 8)", "(1 2 3 4 5 6 7 8)"));
    }

    #[test]
    fn test_nested_structure_kinds() {
        // A list is never equal to an atom
        assert!(!eq("(a)", "a"));
        assert!(!eq("()", "(())"));
    }
}
