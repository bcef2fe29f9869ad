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

//! List operation scenarios end to end

mod common;

use lisq::{Error, Sexp};

fn parse(text: &str) -> Sexp {
    Sexp::parse(text).unwrap()
}

#[test]
fn test_length_scenarios() {
    assert_eq!(parse("()").length().unwrap(), 0);
    assert_eq!(parse("a").length().unwrap(), 1);
    assert_eq!(parse("(a b c d e)").length().unwrap(), 5);
}

#[test]
fn test_car_cdr_rebuild_identity() {
    // L == (cons (car L) (cdr L)), expressed through text
    let mut rng = common::rng(0xCAFE);
    for _ in 0..100 {
        let text = format!(
            "({} {})",
            common::random_sexp(&mut rng, 2),
            common::random_sexp(&mut rng, 2)
        );
        let list = parse(&text);
        let head = list.car().unwrap().unwrap();
        let tail = list.cdr().unwrap().unwrap();
        assert_eq!(
            list.length().unwrap(),
            1 + tail.length().unwrap(),
            "length identity for {text}"
        );

        // Rebuild by splicing printed parts back together; the tail of a
        // 2-element list is always a parenthesized 1-element list
        let tail_text = tail.to_text().unwrap();
        let inner = &tail_text[1..tail_text.len() - 1];
        let rebuilt = parse(&format!("({} {})", head.to_text().unwrap(), inner));
        assert!(rebuilt.equal(&list).unwrap(), "rebuild of {text}");
    }
}

#[test]
fn test_cdr_chains_to_nil() {
    let mut value = parse("(1 2 3 4 5 6)");
    let mut steps = 0;
    while !value.is_nil() {
        value = value.cdr().unwrap().unwrap();
        steps += 1;
        assert!(steps <= 6, "cdr chain must terminate");
    }
    assert_eq!(steps, 6);
}

#[test]
fn test_nth_across_formats() {
    // Small list: linear scan; large list: entry table
    let small = parse("(a b c d)");
    let large = parse("(a b c d e f g)");
    for (i, expect) in ["a", "b", "c", "d"].iter().enumerate() {
        assert_eq!(
            small.nth(i as i32).unwrap().unwrap(),
            parse(expect),
            "small[{i}]"
        );
    }
    for (i, expect) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
        assert_eq!(
            large.nth(i as i32).unwrap().unwrap(),
            parse(expect),
            "large[{i}]"
        );
    }
    assert_eq!(small.nth(4).unwrap(), None);
    assert_eq!(large.nth(7).unwrap(), None);
}

#[test]
fn test_nth_on_atom() {
    // An atom behaves as a length-1 sequence
    let atom = parse("solo");
    assert_eq!(atom.nth(0).unwrap().unwrap(), atom);
    assert_eq!(atom.nth(1).unwrap(), None);
    assert_eq!(atom.length().unwrap(), 1);
}

#[test]
fn test_type_errors() {
    assert_eq!(
        parse("42").car().unwrap_err(),
        Error::NotAList { op: "car" }
    );
    assert_eq!(
        parse("\"s\"").cdr().unwrap_err(),
        Error::NotAList { op: "cdr" }
    );
    // NIL is absent, not an error
    assert_eq!(parse("()").car().unwrap(), None);
    assert_eq!(parse("()").cdr().unwrap(), None);
}

#[test]
fn test_type_of_all_kinds() {
    let cases = [
        ("()", "nil"),
        ("sym", "symbol"),
        ("\"str\"", "string"),
        ("5", "integer"),
        ("5000000000", "integer"),
        ("5.5", "float"),
        ("(l)", "list"),
    ];
    for (text, expected) in cases {
        assert_eq!(parse(text).type_of(), expected, "type_of {text}");
    }
}

#[test]
fn test_head_alias() {
    let list = parse("((nested head) tail)");
    assert_eq!(
        list.head().unwrap().unwrap(),
        list.car().unwrap().unwrap()
    );
}

#[test]
fn test_extraction_preserves_nested_lists() {
    // Extracting a large-format child out of a small-format parent and
    // vice versa
    let value = parse("((1 2 3 4 5 6) (a b))");
    let first = value.nth(0).unwrap().unwrap();
    let second = value.nth(1).unwrap().unwrap();
    assert_eq!(first, parse("(1 2 3 4 5 6)"));
    assert_eq!(second, parse("(a b)"));
    assert_eq!(first.length().unwrap(), 6);
}
